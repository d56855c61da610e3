//! Interactive wallet REPL.

use std::path::PathBuf;
use std::sync::Arc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::debug;

use wallet_client::{ClientConfig, ClientError, SharedDisplay, WalletRuntime};
use wallet_models::ModelError;

use crate::error::Result;
use crate::terminal::{format_address_book, format_staged, format_status, TerminalView};

/// Help information for a command.
pub struct CommandHelp {
    /// Command name (e.g., "send").
    pub name: &'static str,
    /// Command aliases.
    pub aliases: &'static [&'static str],
    /// Usage syntax.
    pub usage: &'static str,
    /// Brief one-line description.
    pub brief: &'static str,
}

/// Static help entries for all commands.
static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "add",
        aliases: &[],
        usage: "/add <label> <address>",
        brief: "Add an address book entry",
    },
    CommandHelp {
        name: "rm",
        aliases: &["remove"],
        usage: "/rm <label>",
        brief: "Remove an address book entry",
    },
    CommandHelp {
        name: "book",
        aliases: &["b", "ls"],
        usage: "/book",
        brief: "Show the address book",
    },
    CommandHelp {
        name: "send",
        aliases: &[],
        usage: "/send <label> [amount]",
        brief: "Stage an output to a label (asks for the amount if omitted)",
    },
    CommandHelp {
        name: "unstage",
        aliases: &["un"],
        usage: "/unstage <n>",
        brief: "Remove staged output number n",
    },
    CommandHelp {
        name: "staged",
        aliases: &["st"],
        usage: "/staged",
        brief: "Show staged outputs and fee",
    },
    CommandHelp {
        name: "fee",
        aliases: &[],
        usage: "/fee <amount>",
        brief: "Set the transaction fee",
    },
    CommandHelp {
        name: "submit",
        aliases: &[],
        usage: "/submit",
        brief: "Submit the staged outputs",
    },
    CommandHelp {
        name: "status",
        aliases: &["s"],
        usage: "/status",
        brief: "Show node and wallet status",
    },
    CommandHelp {
        name: "save",
        aliases: &[],
        usage: "/save",
        brief: "Save the address book to the node",
    },
    CommandHelp {
        name: "help",
        aliases: &["h", "?"],
        usage: "/help [command]",
        brief: "Show help",
    },
    CommandHelp {
        name: "quit",
        aliases: &["q", "exit"],
        usage: "/quit",
        brief: "Exit the wallet",
    },
];

/// Tab completion for slash commands.
struct CommandCompleter;

impl CommandCompleter {
    const COMMANDS: &'static [&'static str] = &[
        "/add", "/book", "/fee", "/help", "/quit", "/rm", "/save", "/send", "/staged",
        "/status", "/submit", "/unstage",
    ];
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let prefix = &line[..pos];
        let matches: Vec<Pair> = Self::COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Slash commands available in the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Add an address book entry
    Add { label: String, address: String },
    /// Remove an address book entry
    Remove(String),
    /// Show the address book
    Book,
    /// Stage an output; the amount is asked for when missing
    Send { label: String, amount: Option<String> },
    /// Remove a staged output by zero-based index
    Unstage(usize),
    /// Show staged outputs
    Staged,
    /// Set the fee field
    Fee(String),
    /// Submit the staged outputs
    Submit,
    /// Show node and wallet status
    Status,
    /// Save the address book
    Save,
    /// Show help
    Help(Option<String>),
    /// Quit the REPL
    Quit,
    /// Unknown command or bad arguments
    Unknown(String),
    /// Plain text (not a command)
    Text(String),
}

impl ReplCommand {
    /// Parses input into a REPL command.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let Some(stripped) = input.strip_prefix('/') else {
            return ReplCommand::Text(input.to_string());
        };

        let parts: Vec<&str> = stripped.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let arg = parts
            .get(1)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty());

        match cmd.as_str() {
            "add" => Self::parse_add(arg),
            "rm" | "remove" => arg
                .map(|label| ReplCommand::Remove(label.to_string()))
                .unwrap_or_else(|| ReplCommand::Unknown("rm requires a label".to_string())),
            "book" | "b" | "ls" => ReplCommand::Book,
            "send" => Self::parse_send(arg),
            "unstage" | "un" => Self::parse_unstage(arg),
            "staged" | "st" => ReplCommand::Staged,
            "fee" => ReplCommand::Fee(arg.unwrap_or_default().to_string()),
            "submit" => ReplCommand::Submit,
            "status" | "s" => ReplCommand::Status,
            "save" => ReplCommand::Save,
            "help" | "h" | "?" => ReplCommand::Help(arg.map(str::to_string)),
            "quit" | "q" | "exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(format!("unknown command: /{}", cmd)),
        }
    }

    /// `/add <label> <address>`; the address is the last word.
    fn parse_add(arg: Option<&str>) -> Self {
        let usage = || ReplCommand::Unknown("usage: /add <label> <address>".to_string());
        let Some(arg) = arg else {
            return usage();
        };
        match arg.rsplit_once(char::is_whitespace) {
            Some((label, address)) => ReplCommand::Add {
                label: label.trim().to_string(),
                address: address.to_string(),
            },
            None => usage(),
        }
    }

    /// `/send <label> [amount]`; the amount is the last word if there are two.
    fn parse_send(arg: Option<&str>) -> Self {
        let Some(arg) = arg else {
            return ReplCommand::Unknown("usage: /send <label> [amount]".to_string());
        };
        match arg.rsplit_once(char::is_whitespace) {
            Some((label, amount)) => ReplCommand::Send {
                label: label.trim().to_string(),
                amount: Some(amount.to_string()),
            },
            None => ReplCommand::Send {
                label: arg.to_string(),
                amount: None,
            },
        }
    }

    /// `/unstage <n>` with n counted from 1 as listed by `/staged`.
    fn parse_unstage(arg: Option<&str>) -> Self {
        match arg.and_then(|a| a.parse::<usize>().ok()) {
            Some(n) if n >= 1 => ReplCommand::Unstage(n - 1),
            _ => ReplCommand::Unknown("usage: /unstage <n>, n as listed by /staged".to_string()),
        }
    }
}

/// REPL state
pub struct Repl {
    editor: Editor<CommandCompleter, DefaultHistory>,
    runtime: tokio::runtime::Runtime,
    wallet: WalletRuntime,
    display: SharedDisplay,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Creates a REPL connected to `config.node_url`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let rl_config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(CommandCompleter));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let display = SharedDisplay::new();
        let view = Arc::new(TerminalView::stdout(display.clone()));
        let wallet = WalletRuntime::connect(config, view);

        let history_path = dirs::home_dir().map(|h| h.join(".wallet_history"));
        if let Some(path) = history_path.as_ref().filter(|p| p.exists()) {
            let _ = editor.load_history(path);
        }

        Ok(Self {
            editor,
            runtime,
            wallet,
            display,
            history_path,
        })
    }

    /// Runs the REPL loop until quit, end of input or node shutdown.
    pub fn run(&mut self) -> Result<()> {
        println!("Wallet v{}", env!("CARGO_PKG_VERSION"));
        println!("Node: {}", self.wallet.config().node_url);
        println!("Type /help for commands, /quit to exit");
        println!();

        {
            let _guard = self.runtime.enter();
            self.wallet.start()?;
        }

        loop {
            if self.wallet.session().is_closed() {
                break;
            }

            match self.editor.readline("wallet> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(&line)?;

                    let cmd = ReplCommand::parse(&line);
                    debug!(?cmd, "Parsed command");

                    if self.handle_command(cmd) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.history_path {
            let _ = self.editor.save_history(path);
        }

        self.runtime.block_on(self.wallet.shutdown())?;
        println!("Goodbye!");
        Ok(())
    }

    /// Handles a REPL command. Returns true if should quit.
    fn handle_command(&mut self, cmd: ReplCommand) -> bool {
        let session = self.wallet.session();

        let result = match cmd {
            ReplCommand::Add { label, address } => session.add_address(&label, &address),

            ReplCommand::Remove(label) => session.remove_address(&label).map(|removed| {
                if removed.is_none() {
                    println!("No entry labelled '{}'", label);
                }
            }),

            ReplCommand::Book => {
                println!("{}", format_address_book(&self.display.snapshot()));
                Ok(())
            }

            ReplCommand::Send { label, amount } => self.stage(&label, amount),

            ReplCommand::Unstage(index) => session.unstage(index).map(|_| {
                println!("{}", format_staged(&self.display.snapshot()));
            }),

            ReplCommand::Staged => {
                println!("{}", format_staged(&self.display.snapshot()));
                Ok(())
            }

            ReplCommand::Fee(fee) => session.set_fee_input(&fee),

            ReplCommand::Submit => {
                let submitter = self.wallet.submitter();
                // Results and alerts are printed by the view
                self.runtime
                    .block_on(submitter.submit_with_fee_input())
                    .map(|_| ())
            }

            ReplCommand::Status => {
                println!("{}", format_status(&self.display.snapshot()));
                Ok(())
            }

            ReplCommand::Save => self
                .runtime
                .block_on(session.save_address_book())
                .map(|_| println!("Address book saved")),

            ReplCommand::Help(topic) => {
                print_help(topic.as_deref());
                Ok(())
            }

            ReplCommand::Quit => return true,

            ReplCommand::Unknown(msg) => {
                println!("{}. Type /help for available commands.", msg);
                Ok(())
            }

            ReplCommand::Text(_) => {
                println!("Commands start with '/'. Type /help for available commands.");
                Ok(())
            }
        };

        if let Err(e) = result {
            report(&e);
        }
        false
    }

    /// Stages an output, asking for the amount when it was not given.
    fn stage(&mut self, label: &str, amount: Option<String>) -> wallet_client::Result<()> {
        let session = self.wallet.session();
        let book = session.address_book();

        // "/send Alice Smith" names a multi-word label, not an amount
        let (label, amount) = match amount {
            Some(amount) if !book.contains(label) => {
                let full = format!("{} {}", label, amount);
                if book.contains(&full) {
                    (full, None)
                } else {
                    (label.to_string(), Some(amount))
                }
            }
            other => (label.to_string(), other),
        };
        let label = label.as_str();

        if !book.contains(label) {
            println!("No entry labelled '{}'. Use /add first.", label);
            return Ok(());
        }

        let amount = match amount {
            Some(amount) => amount,
            None => match self.editor.readline(&format!("amount for {}: ", label)) {
                Ok(amount) => amount,
                Err(_) => return Ok(()),
            },
        };

        session.stage_from_input(label, &amount)?;
        println!("{}", format_staged(&self.display.snapshot()));
        Ok(())
    }
}

/// Prints an error the view has not already shown.
fn report(err: &ClientError) {
    match err {
        ClientError::Model(e @ ModelError::IndexOutOfRange { .. }) => println!("{}", e),
        // Rejected input already raised an alert
        ClientError::Model(_) => {}
        ClientError::SessionClosed => println!("The wallet is locked: the node has shut down."),
        // Logged by the session
        ClientError::Network(_) | ClientError::Protocol(_) => {}
        other => eprintln!("Error: {}", other),
    }
}

fn find_command_help(name: &str) -> Option<&'static CommandHelp> {
    let name = name.trim_start_matches('/').to_lowercase();
    COMMAND_HELP
        .iter()
        .find(|h| h.name == name || h.aliases.contains(&name.as_str()))
}

/// Prints help information.
fn print_help(topic: Option<&str>) {
    match topic {
        Some(cmd) => match find_command_help(cmd) {
            Some(help) => {
                println!("{} - {}", help.usage, help.brief);
                if !help.aliases.is_empty() {
                    println!("Aliases: {}", help.aliases.join(", "));
                }
            }
            None => println!("Unknown command: {}. Type /help for available commands.", cmd),
        },
        None => {
            println!("COMMANDS:");
            for help in COMMAND_HELP {
                println!("  {:<26} {}", help.usage, help.brief);
            }
        }
    }
}
