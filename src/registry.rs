//! Variant registry: maps request shapes to operation identifiers and
//! wire-format root tokens.
//!
//! Classification is an exhaustive match over the closed request enums.
//! Structural consistency is checked here, before any encoding takes
//! place, so an inconsistent request fails fast with
//! [`GatewayError::UnsupportedVariant`] instead of producing a document
//! the gateway would reject.

use crate::errors::{GatewayError, Result};
use crate::types::{
    CaptureMode, GatewayRequest, ProfileRequest, SubscriptionRequest, TransactionRequest,
};

/// The wire-syntax family an operation is encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFamily {
    /// Flat percent-encoded `key=value&...` body.
    UrlEncoded,
    /// Tree-structured XML document.
    Xml,
}

/// The classification of a request: operation identifier, wire-format
/// root token, and wire-syntax family.
///
/// The root token is the root element name for the XML family and empty
/// for the flat family, which has no root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation identifier ("capture", "create", "update", ...).
    pub id: &'static str,
    /// Root element name for the markup wire format.
    pub root: &'static str,
    /// Wire-syntax family.
    pub family: WireFamily,
}

impl Operation {
    const fn xml(id: &'static str, root: &'static str) -> Self {
        Operation {
            id,
            root,
            family: WireFamily::Xml,
        }
    }
}

/// Classifies a request into its operation.
///
/// Fails with [`GatewayError::UnsupportedVariant`] when the request's
/// populated fields do not form a known operation shape. This never
/// silently falls through: every variant either classifies or errors.
///
/// # Examples
///
/// ```
/// use payrs::registry::{classify, WireFamily};
/// use payrs::types::{GatewayRequest, ProfileRequest};
///
/// let request = GatewayRequest::Profile(ProfileRequest::RetrieveAll);
/// let operation = classify(&request).unwrap();
/// assert_eq!(operation.id, "retrieve");
/// assert_eq!(operation.root, "getCustomerProfileIdsRequest");
/// assert_eq!(operation.family, WireFamily::Xml);
/// ```
pub fn classify(request: &GatewayRequest) -> Result<Operation> {
    match request {
        GatewayRequest::Transaction(transaction) => classify_transaction(transaction),
        GatewayRequest::Subscription(subscription) => classify_subscription(subscription),
        GatewayRequest::Profile(profile) => classify_profile(profile),
    }
}

fn classify_transaction(transaction: &TransactionRequest) -> Result<Operation> {
    match transaction.capture_mode {
        CaptureMode::Credit | CaptureMode::PriorAuthorizationCapture | CaptureMode::Void
            if transaction.transaction_id.is_none() =>
        {
            return Err(GatewayError::UnsupportedVariant(format!(
                "{} transaction without a transaction id",
                transaction.capture_mode.wire_token()
            )));
        }
        CaptureMode::CaptureOnly if transaction.auth_code.is_none() => {
            return Err(GatewayError::UnsupportedVariant(
                "CAPTURE_ONLY transaction without an authorization code".to_string(),
            ));
        }
        // Charge modes move money and need an amount; void and
        // prior-auth-capture may omit it.
        CaptureMode::AuthorizeCapture
        | CaptureMode::AuthorizeOnly
        | CaptureMode::CaptureOnly
        | CaptureMode::Credit
            if transaction.amount.is_none() =>
        {
            return Err(GatewayError::UnsupportedVariant(format!(
                "{} transaction without an amount",
                transaction.capture_mode.wire_token()
            )));
        }
        _ => {}
    }

    Ok(Operation {
        id: "capture",
        root: "",
        family: WireFamily::UrlEncoded,
    })
}

fn classify_subscription(subscription: &SubscriptionRequest) -> Result<Operation> {
    match subscription {
        SubscriptionRequest::Create(order) => {
            if order.schedule.is_none() || order.amount.is_none() || order.payment.is_none() {
                return Err(GatewayError::UnsupportedVariant(
                    "subscription creation requires a schedule, an amount, and a payment"
                        .to_string(),
                ));
            }
            Ok(Operation::xml("create", "ARBCreateSubscriptionRequest"))
        }
        SubscriptionRequest::Update { order, .. } => {
            if order.schedule.is_none() && order.amount.is_none() && order.payment.is_none() {
                return Err(GatewayError::UnsupportedVariant(
                    "subscription update carries no schedule, amount, or payment".to_string(),
                ));
            }
            Ok(Operation::xml("update", "ARBUpdateSubscriptionRequest"))
        }
        SubscriptionRequest::Status { .. } => {
            Ok(Operation::xml("status", "ARBGetSubscriptionStatusRequest"))
        }
        SubscriptionRequest::Cancel { .. } => {
            Ok(Operation::xml("cancel", "ARBCancelSubscriptionRequest"))
        }
    }
}

fn classify_profile(profile: &ProfileRequest) -> Result<Operation> {
    let operation = match profile {
        ProfileRequest::Create { .. } => Operation::xml("create", "createCustomerProfileRequest"),
        ProfileRequest::CreateBilling { billing, .. } => {
            if billing.payment.is_none() {
                return Err(GatewayError::UnsupportedVariant(
                    "billing sub-profile creation requires a payment instrument".to_string(),
                ));
            }
            Operation::xml("create", "createCustomerPaymentProfileRequest")
        }
        ProfileRequest::CreateShipping { .. } => {
            Operation::xml("create", "createCustomerShippingAddressRequest")
        }
        ProfileRequest::CreateTransaction { .. } => {
            Operation::xml("create", "createCustomerProfileTransactionRequest")
        }
        ProfileRequest::Update { .. } => Operation::xml("update", "updateCustomerProfileRequest"),
        ProfileRequest::UpdateBilling { billing, .. } => {
            if billing.payment.is_none() {
                return Err(GatewayError::UnsupportedVariant(
                    "billing sub-profile update requires a payment instrument".to_string(),
                ));
            }
            Operation::xml("update", "updateCustomerPaymentProfileRequest")
        }
        ProfileRequest::UpdateShipping { .. } => {
            Operation::xml("update", "updateCustomerShippingAddressRequest")
        }
        ProfileRequest::UpdateSplitTender { .. } => {
            Operation::xml("update", "updateSplitTenderGroupRequest")
        }
        ProfileRequest::RetrieveAll => Operation::xml("retrieve", "getCustomerProfileIdsRequest"),
        ProfileRequest::Retrieve { .. } => Operation::xml("retrieve", "getCustomerProfileRequest"),
        ProfileRequest::RetrieveBilling { .. } => {
            Operation::xml("retrieve", "getCustomerPaymentProfileRequest")
        }
        ProfileRequest::RetrieveShipping { .. } => {
            Operation::xml("retrieve", "getCustomerShippingAddressRequest")
        }
        ProfileRequest::Delete { .. } => Operation::xml("delete", "deleteCustomerProfileRequest"),
        ProfileRequest::DeleteBilling { .. } => {
            Operation::xml("delete", "deleteCustomerPaymentProfileRequest")
        }
        ProfileRequest::DeleteShipping { .. } => {
            Operation::xml("delete", "deleteCustomerShippingAddressRequest")
        }
        ProfileRequest::Validate { .. } => {
            Operation::xml("validate", "validateCustomerPaymentProfileRequest")
        }
    };

    Ok(operation)
}
