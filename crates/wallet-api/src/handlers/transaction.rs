//! Transaction submission handler.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use wallet_models::{TransactionRequest, TransactionResponse};

use crate::backend::OutputSpec;
use crate::state::AppState;

/// POST /api/transaction - Submit a transaction.
///
/// Rejections, malformed bodies included, are answered with
/// `success: false` and a 200 status, as the wallet only reads the body.
pub async fn submit_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Json<TransactionResponse> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed transaction body");
            return Json(TransactionResponse::rejected(format!(
                "malformed transaction: {}",
                rejection.body_text()
            )));
        }
    };

    info!(
        outputs = req.recipients.len(),
        fee = req.fee,
        total = req.total_spend(),
        "transaction requested"
    );

    let balance = state.backend.user_status().await.amount;
    let (outputs, fee) = match decode_outputs(&req, balance) {
        Ok(decoded) => decoded,
        Err(reason) => {
            warn!(%reason, "transaction rejected");
            return Json(TransactionResponse::rejected(reason));
        }
    };

    let response = state.backend.submit(outputs, fee).await;
    info!(success = response.success, message = %response.message, "transaction handled");

    Json(response)
}

/// Checks the request against the wallet balance and decodes each address.
///
/// Returns the decoded outputs and the fee. Negative values are refused
/// before the balance is looked at.
fn decode_outputs(req: &TransactionRequest, balance: u64) -> Result<(Vec<OutputSpec>, u64), String> {
    if req.recipients.is_empty() {
        return Err("transaction has no recipients".to_string());
    }

    let fee = u64::try_from(req.fee).map_err(|_| format!("negative fee {}", req.fee))?;
    let values = req
        .recipients
        .iter()
        .enumerate()
        .map(|(index, (_, amount))| {
            u64::try_from(*amount)
                .map_err(|_| format!("recipient {} has negative amount {}", index, amount))
        })
        .collect::<Result<Vec<u64>, String>>()?;

    let total = values
        .iter()
        .fold(fee, |acc, value| acc.saturating_add(*value));
    if total > balance {
        return Err(format!(
            "insufficient funds: need {}, have {}",
            total, balance
        ));
    }

    let outputs = req
        .recipients
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, ((address, _), value))| {
            let address = address
                .as_deref()
                .ok_or_else(|| format!("recipient {} has no address", index))?;
            OutputSpec::from_hex(address, value)
                .map_err(|e| format!("invalid address {:?}: {}", address, e))
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok((outputs, fee))
}
