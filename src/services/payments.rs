//! Payment gateway client
//!
//! Talks to the Mercado Pago REST API: payment preferences are registered at
//! creation time, and authoritative payment state is re-fetched when a
//! webhook notification arrives. The trait is the seam the reconciliation
//! resolver is tested against.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    config::PaymentConfig,
    error::{AppError, AppResult},
    models::booking::PaymentRecord,
};

/// Payment statuses reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
    Pending,
    Authorized,
    InProcess,
    InMediation,
    Rejected,
    Cancelled,
    Refunded,
    ChargedBack,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// The payment will never complete; the payer should be told.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Rejected
                | PaymentStatus::Cancelled
                | PaymentStatus::Refunded
                | PaymentStatus::ChargedBack
        )
    }

    /// Another webhook is expected later; nothing to do now.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending
                | PaymentStatus::Authorized
                | PaymentStatus::InProcess
                | PaymentStatus::InMediation
        )
    }
}

/// Settlement breakdown nested in the gateway payment object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionDetails {
    #[serde(default)]
    pub net_received_amount: Decimal,
}

/// Authoritative payment object fetched from the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayPayment {
    pub id: i64,
    pub status: PaymentStatus,
    pub transaction_amount: Decimal,
    pub currency_id: String,
    pub payment_method_id: String,
    #[serde(default)]
    pub transaction_details: TransactionDetails,
}

impl GatewayPayment {
    /// Gateway fee: gross amount minus what the collector actually receives
    pub fn fee_amount(&self) -> Decimal {
        let net = self.transaction_details.net_received_amount;
        if net.is_zero() {
            Decimal::ZERO
        } else {
            self.transaction_amount - net
        }
    }

    pub fn to_record(&self) -> PaymentRecord {
        PaymentRecord {
            external_payment_id: self.id.to_string(),
            gross_amount: self.transaction_amount,
            fee_amount: self.fee_amount(),
            currency_id: self.currency_id.clone(),
            payment_method_id: self.payment_method_id.clone(),
        }
    }
}

/// What the gateway needs to open a checkout for a pending purchase
#[derive(Debug, Clone)]
pub struct PreferenceInfo {
    pub title: String,
    pub unit_price: Decimal,
    pub payer_email: String,
    /// Our id for the object being paid (booking or acquisition)
    pub external_reference: String,
    /// Where the gateway will deliver payment webhooks for this purchase
    pub notification_url: String,
}

/// Gateway-side checkout handle
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPreference {
    pub id: String,
    /// Checkout URL the renter is redirected to
    pub init_point: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a payment preference; the returned id is handed to the
    /// renter's checkout flow.
    async fn create_preference(&self, info: &PreferenceInfo) -> AppResult<PaymentPreference>;

    /// Fetch the authoritative payment object by its gateway id. `None`
    /// means the gateway does not know the payment.
    async fn fetch_payment(&self, payment_id: &str) -> AppResult<Option<GatewayPayment>>;
}

#[derive(Serialize)]
struct PreferenceItem<'a> {
    title: &'a str,
    quantity: u32,
    unit_price: Decimal,
    currency_id: &'a str,
}

#[derive(Serialize)]
struct PreferencePayer<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct PreferenceRequest<'a> {
    items: Vec<PreferenceItem<'a>>,
    payer: PreferencePayer<'a>,
    external_reference: &'a str,
    notification_url: &'a str,
}

/// Mercado Pago REST client
#[derive(Clone)]
pub struct MercadoPagoClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    currency_id: String,
}

impl MercadoPagoClient {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            currency_id: config.currency_id.clone(),
        }
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoClient {
    async fn create_preference(&self, info: &PreferenceInfo) -> AppResult<PaymentPreference> {
        let request = PreferenceRequest {
            items: vec![PreferenceItem {
                title: &info.title,
                quantity: 1,
                unit_price: info.unit_price,
                currency_id: &self.currency_id,
            }],
            payer: PreferencePayer {
                email: &info.payer_email,
            },
            external_reference: &info.external_reference,
            notification_url: &info.notification_url,
        };

        let response = self
            .http
            .post(format!("{}/checkout/preferences", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("preference request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::PaymentGateway(format!(
                "preference creation returned {}",
                response.status()
            )));
        }

        response
            .json::<PaymentPreference>()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("invalid preference response: {e}")))
    }

    async fn fetch_payment(&self, payment_id: &str) -> AppResult<Option<GatewayPayment>> {
        let response = self
            .http
            .get(format!("{}/v1/payments/{}", self.base_url, payment_id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("payment fetch failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::PaymentGateway(format!(
                "payment fetch returned {}",
                response.status()
            )));
        }

        let payment = response
            .json::<GatewayPayment>()
            .await
            .map_err(|e| AppError::PaymentGateway(format!("invalid payment response: {e}")))?;
        Ok(Some(payment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_statuses_deserialize_from_gateway_strings() {
        let approved: PaymentStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(approved, PaymentStatus::Approved);

        let charged_back: PaymentStatus = serde_json::from_str("\"charged_back\"").unwrap();
        assert_eq!(charged_back, PaymentStatus::ChargedBack);

        let in_process: PaymentStatus = serde_json::from_str("\"in_process\"").unwrap();
        assert_eq!(in_process, PaymentStatus::InProcess);

        let unknown: PaymentStatus = serde_json::from_str("\"brand_new_status\"").unwrap();
        assert_eq!(unknown, PaymentStatus::Unknown);
    }

    #[test]
    fn status_classification_matches_gateway_semantics() {
        for status in [
            PaymentStatus::Rejected,
            PaymentStatus::Cancelled,
            PaymentStatus::Refunded,
            PaymentStatus::ChargedBack,
        ] {
            assert!(status.is_terminal_failure());
            assert!(!status.is_in_flight());
        }
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Authorized,
            PaymentStatus::InProcess,
            PaymentStatus::InMediation,
        ] {
            assert!(status.is_in_flight());
            assert!(!status.is_terminal_failure());
        }
        assert!(!PaymentStatus::Approved.is_terminal_failure());
        assert!(!PaymentStatus::Approved.is_in_flight());
    }

    #[test]
    fn fee_is_gross_minus_net_received() {
        let payment: GatewayPayment = serde_json::from_str(
            r#"{
                "id": 9042,
                "status": "approved",
                "transaction_amount": 110,
                "currency_id": "ARS",
                "payment_method_id": "visa",
                "transaction_details": { "net_received_amount": 104.5 }
            }"#,
        )
        .unwrap();

        assert_eq!(payment.fee_amount(), Decimal::new(55, 1));
        let record = payment.to_record();
        assert_eq!(record.external_payment_id, "9042");
        assert_eq!(record.gross_amount, Decimal::from(110));
    }

    #[test]
    fn missing_transaction_details_yield_zero_fee() {
        let payment: GatewayPayment = serde_json::from_str(
            r#"{
                "id": 9042,
                "status": "approved",
                "transaction_amount": 110,
                "currency_id": "ARS",
                "payment_method_id": "visa"
            }"#,
        )
        .unwrap();

        assert_eq!(payment.fee_amount(), Decimal::ZERO);
    }
}
