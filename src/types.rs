//! Core request-model types.
//!
//! Every type in this module is an immutable value object: the caller
//! builds it, hands it to an encoder exactly once, and discards it. The
//! core never mutates a request. Amount fields are carried as
//! pre-validated decimal strings (for example `"9.99"`) because the
//! gateway treats them as opaque text; format checking belongs to the
//! validation collaborator, not to this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Merchant authentication values sent with every request.
///
/// # Examples
///
/// ```
/// use payrs::types::MerchantAuthentication;
///
/// let auth = MerchantAuthentication::new("api_login", "transaction_key");
/// assert_eq!(auth.login, "api_login");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MerchantAuthentication {
    /// The merchant's unique API login id.
    pub login: String,

    /// The merchant's unique transaction key.
    pub key: String,
}

impl MerchantAuthentication {
    /// Creates a new authentication pair.
    pub fn new(login: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            key: key.into(),
        }
    }
}

/// A postal address, used for both billing and shipping contexts.
///
/// All fields are optional; encoders emit only the fields that are set.
/// The same type is reused verbatim inside profile sub-objects and inside
/// decoded replies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Street address.
    pub street: Option<String>,
    /// City of residence.
    pub city: Option<String>,
    /// State or province.
    pub region: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Country of residence.
    pub country: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Fax number.
    pub fax: Option<String>,
}

impl Address {
    /// Returns true when no field is set at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.company.is_none()
            && self.street.is_none()
            && self.city.is_none()
            && self.region.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
            && self.phone.is_none()
            && self.fax.is_none()
    }
}

/// Recognized card brands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CardBrand {
    /// Visa.
    Visa,
    /// MasterCard.
    Mastercard,
    /// Discover.
    Discover,
    /// American Express.
    Amex,
    /// JCB.
    Jcb,
    /// Diners Club.
    DinersClub,
}

/// A credit card payment instrument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Primary account number.
    pub number: String,

    /// Expiration date. Only the month and year are rendered on the wire.
    pub expiration: NaiveDate,

    /// Card verification code (CCV/CVV).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,

    /// Card brand, when the caller knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<CardBrand>,
}

/// Bank account types accepted by the gateway.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankAccountType {
    /// Personal checking account.
    #[serde(rename = "checking")]
    Checking,
    /// Savings account.
    #[serde(rename = "savings")]
    Savings,
    /// Business checking account.
    #[serde(rename = "businessChecking")]
    BusinessChecking,
}

impl BankAccountType {
    /// The exact token the gateway expects.
    pub fn wire_token(&self) -> &'static str {
        match self {
            BankAccountType::Checking => "checking",
            BankAccountType::Savings => "savings",
            BankAccountType::BusinessChecking => "businessChecking",
        }
    }
}

/// Electronic check transaction types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcheckType {
    /// Cash concentration or disbursement.
    Ccd,
    /// Prearranged payment and deposit.
    Ppd,
    /// Telephone-initiated entry.
    Tel,
    /// Internet-initiated entry.
    Web,
}

impl EcheckType {
    /// The exact token the gateway expects.
    pub fn wire_token(&self) -> &'static str {
        match self {
            EcheckType::Ccd => "CCD",
            EcheckType::Ppd => "PPD",
            EcheckType::Tel => "TEL",
            EcheckType::Web => "WEB",
        }
    }
}

/// A bank account payment instrument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    /// Bank account number.
    pub account_number: String,

    /// Bank routing (ABA) number.
    pub routing_number: String,

    /// Account holder's name.
    pub holder_name: String,

    /// Name of the account holder's bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,

    /// Bank account type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<BankAccountType>,

    /// Electronic check type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echeck_type: Option<EcheckType>,
}

/// A payment instrument: exactly one variant is active per instrument.
///
/// Encoders branch on the active variant and emit a disjoint field set per
/// branch; the closed enum makes an unrecognized instrument unrepresentable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum PaymentInstrument {
    /// Credit card.
    Card(Card),
    /// Bank account (electronic check).
    Bank(BankAccount),
}

/// A named charge amount used for the tax, duty, and freight singletons.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ChargeItem {
    /// Name of the charge.
    pub name: String,
    /// Description of the charge.
    pub description: String,
    /// Charge amount as a decimal string.
    pub amount: String,
}

/// An itemized order line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Merchant-assigned item id.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Cost per unit excluding tax, freight, and duty.
    pub unit_price: String,
    /// Whether the item is subject to tax.
    pub taxable: bool,
}

/// Billing interval units for a subscription schedule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    /// Interval measured in days.
    Days,
    /// Interval measured in months.
    Months,
}

impl IntervalUnit {
    /// The exact token the gateway expects.
    pub fn wire_token(&self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Months => "months",
        }
    }
}

/// A recurring billing schedule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Measurement of time between billing occurrences, combined with
    /// `interval_unit`.
    pub interval_length: u16,

    /// Unit of time between billing occurrences.
    pub interval_unit: IntervalUnit,

    /// The date the subscription begins (also the date of initial billing).
    pub start: NaiveDate,

    /// Total number of billing occurrences.
    pub total_cycles: u16,

    /// Number of billing occurrences in the trial period, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_cycles: Option<u16>,
}

/// The transaction lifecycle action requested of the gateway.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// Authorize and capture in one step.
    #[default]
    AuthorizeCapture,
    /// Authorize only; capture later.
    AuthorizeOnly,
    /// Capture a previously obtained authorization code.
    CaptureOnly,
    /// Credit (refund) a settled transaction.
    Credit,
    /// Capture a prior authorization issued by this gateway.
    PriorAuthorizationCapture,
    /// Void an unsettled transaction.
    Void,
}

impl CaptureMode {
    /// The exact token the gateway expects in the flat wire format.
    pub fn wire_token(&self) -> &'static str {
        match self {
            CaptureMode::AuthorizeCapture => "AUTH_CAPTURE",
            CaptureMode::AuthorizeOnly => "AUTH_ONLY",
            CaptureMode::CaptureOnly => "CAPTURE_ONLY",
            CaptureMode::Credit => "CREDIT",
            CaptureMode::PriorAuthorizationCapture => "PRIOR_AUTH_CAPTURE",
            CaptureMode::Void => "VOID",
        }
    }
}

/// A single payment transaction request.
///
/// Most fields are optional; only the fields that are set produce wire
/// output. Construct with struct-update syntax:
///
/// ```
/// use payrs::types::TransactionRequest;
///
/// let request = TransactionRequest {
///     amount: Some("9.99".to_string()),
///     invoice: Some("INV-1001".to_string()),
///     ..Default::default()
/// };
/// assert!(request.description.is_none());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TransactionRequest {
    /// The lifecycle action requested.
    pub capture_mode: CaptureMode,

    /// Total amount to be charged or credited, including tax, shipping,
    /// and any other charges.
    pub amount: Option<String>,

    /// The payment instrument to charge.
    pub payment: Option<PaymentInstrument>,

    /// The customer's billing address.
    pub billing: Option<Address>,

    /// The customer's shipping address.
    pub shipping: Option<Address>,

    /// Merchant-assigned customer identifier.
    pub customer_id: Option<String>,

    /// IP address of the customer initiating the transaction.
    pub customer_ip: Option<String>,

    /// Whether an email receipt should be sent to the customer.
    pub email_customer: Option<bool>,

    /// The customer's email address.
    pub email: Option<String>,

    /// Transaction description.
    pub description: Option<String>,

    /// Email address for the merchant's copy of the confirmation email.
    pub merchant_email: Option<String>,

    /// Override for the merchant-interface partial-authorization setting.
    pub allow_partial_auth: Option<bool>,

    /// Authorization code of an original transaction not authorized on
    /// this gateway; required for capture-only operations.
    pub auth_code: Option<String>,

    /// Electronic commerce indicator (ECI) or UCAF indicator obtained
    /// during cardholder authentication.
    pub authentication_indicator: Option<String>,

    /// Cardholder authentication verification value (CAVV/AVV/UCAF).
    pub cardholder_authentication_value: Option<String>,

    /// Window of time in seconds during which the gateway checks for a
    /// duplicate transaction. Maximum is 8 hours (28800 seconds).
    pub duplicate_window: Option<u32>,

    /// Character used to encapsulate fields in the transaction response.
    pub encapsulation_char: Option<char>,

    /// Footer text for the customer email receipt.
    pub footer_email_receipt: Option<String>,

    /// Header text for the customer email receipt.
    pub header_email_receipt: Option<String>,

    /// Merchant-assigned invoice number.
    pub invoice: Option<String>,

    /// Merchant-assigned purchase order number.
    pub purchase_order: Option<String>,

    /// Gateway-assigned split tender id from an original authorization.
    pub split_tender_id: Option<String>,

    /// Whether the transaction is tax exempt.
    pub tax_exempt: Option<bool>,

    /// Marker identifying merchant-hosted recurring billing transactions.
    pub recurring_billing: Option<bool>,

    /// Whether the transaction should be processed as a test transaction.
    pub test_request: Option<bool>,

    /// Gateway-assigned id of the original transaction; required for
    /// credit, prior-authorization-capture, and void operations.
    pub transaction_id: Option<String>,

    /// Standalone card verification code, used when charging a stored
    /// profile whose card data lives at the gateway.
    pub card_code: Option<String>,

    /// Itemized order information, in caller order.
    pub line_items: Vec<LineItem>,

    /// Tax charge.
    pub tax: Option<ChargeItem>,

    /// Duty charge.
    pub duty: Option<ChargeItem>,

    /// Freight (shipping) charge.
    pub freight: Option<ChargeItem>,
}

/// The shared body of subscription create and update requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SubscriptionOrder {
    /// Caller-supplied reference id echoed back in the reply.
    pub ref_id: Option<String>,

    /// Merchant-assigned name for the subscription.
    pub name: Option<String>,

    /// Merchant-assigned description of the subscription.
    pub description: Option<String>,

    /// Amount billed per occurrence.
    pub amount: Option<String>,

    /// Amount billed per occurrence during the trial period.
    pub trial_amount: Option<String>,

    /// Merchant-assigned invoice number.
    pub invoice: Option<String>,

    /// Merchant-assigned customer identifier.
    pub customer_id: Option<String>,

    /// The customer's email address.
    pub email: Option<String>,

    /// The customer's billing address.
    pub billing: Option<Address>,

    /// The customer's shipping address.
    pub shipping: Option<Address>,

    /// The billing schedule.
    pub schedule: Option<Schedule>,

    /// The payment instrument billed.
    pub payment: Option<PaymentInstrument>,
}

/// A recurring-billing (subscription) request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SubscriptionRequest {
    /// Create a new subscription. Schedule, amount, and payment are
    /// required; the registry rejects the request otherwise.
    Create(SubscriptionOrder),

    /// Update an existing subscription. At least one of schedule, amount,
    /// or payment must be present.
    Update {
        /// The gateway-assigned subscription id.
        id: String,
        /// The fields to update.
        order: SubscriptionOrder,
    },

    /// Retrieve the status of a subscription.
    Status {
        /// The gateway-assigned subscription id.
        id: String,
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
    },

    /// Cancel a subscription.
    Cancel {
        /// The gateway-assigned subscription id.
        id: String,
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
    },
}

/// Customer entity types attached to a billing sub-profile.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    /// An individual customer.
    Individual,
    /// A business customer.
    Business,
}

impl EntityType {
    /// The exact token the gateway expects.
    pub fn wire_token(&self) -> &'static str {
        match self {
            EntityType::Individual => "individual",
            EntityType::Business => "business",
        }
    }
}

/// Processing mode for profile validation requests.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// No validation.
    None,
    /// Validate against the test environment.
    TestMode,
    /// Validate with a live zero-dollar authorization.
    LiveMode,
    /// Validate with the legacy live mode.
    OldLiveMode,
}

impl ValidationMode {
    /// The exact token the gateway expects.
    pub fn wire_token(&self) -> &'static str {
        match self {
            ValidationMode::None => "none",
            ValidationMode::TestMode => "testMode",
            ValidationMode::LiveMode => "liveMode",
            ValidationMode::OldLiveMode => "oldLiveMode",
        }
    }
}

/// A billing sub-profile: an address plus its own payment instrument.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BillingProfile {
    /// Customer entity type.
    pub entity_type: Option<EntityType>,

    /// The billing address.
    pub address: Option<Address>,

    /// The payment instrument attached to this sub-profile.
    pub payment: Option<PaymentInstrument>,
}

/// Status values for a split tender group update.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitTenderStatus {
    /// Void all transactions in the order.
    Voided,
    /// Complete the order.
    Completed,
}

impl SplitTenderStatus {
    /// The exact token the gateway expects.
    pub fn wire_token(&self) -> &'static str {
        match self {
            SplitTenderStatus::Voided => "voided",
            SplitTenderStatus::Completed => "completed",
        }
    }
}

/// A customer-profile request.
///
/// Each variant is tagged with exactly one operation identifier by the
/// variant registry; see [`crate::registry::classify`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ProfileRequest {
    /// Create a new customer profile, optionally with billing and shipping
    /// sub-profiles attached.
    Create {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// Merchant-assigned customer identifier.
        customer_id: Option<String>,
        /// Profile description.
        description: Option<String>,
        /// The customer's email address.
        email: Option<String>,
        /// Billing sub-profiles, in caller order.
        billing: Vec<BillingProfile>,
        /// Shipping addresses, in caller order.
        shipping: Vec<Address>,
        /// Validation mode for the request.
        validation: Option<ValidationMode>,
    },

    /// Attach a billing sub-profile to an existing customer profile.
    CreateBilling {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The sub-profile to attach; its payment instrument is required.
        billing: BillingProfile,
    },

    /// Attach a shipping address to an existing customer profile.
    CreateShipping {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The address to attach.
        shipping: Address,
    },

    /// Run a transaction against a stored profile.
    CreateTransaction {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The billing sub-profile to charge.
        billing_id: u64,
        /// The shipping address to use, if any.
        shipping_id: Option<u64>,
        /// The embedded transaction sub-request.
        transaction: TransactionRequest,
    },

    /// Update the top-level fields of a customer profile.
    Update {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// Merchant-assigned customer identifier.
        customer_id: Option<String>,
        /// Profile description.
        description: Option<String>,
        /// The customer's email address.
        email: Option<String>,
    },

    /// Replace a billing sub-profile.
    UpdateBilling {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned billing sub-profile id.
        billing_id: u64,
        /// Replacement sub-profile; its payment instrument is required.
        billing: BillingProfile,
        /// Validation mode for the request.
        validation: Option<ValidationMode>,
    },

    /// Replace a shipping address.
    UpdateShipping {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned shipping address id.
        shipping_id: u64,
        /// The replacement address.
        shipping: Address,
    },

    /// Update the status of all transactions in a split tender group.
    UpdateSplitTender {
        /// Gateway-assigned number associated with the order.
        split_tender_id: u64,
        /// The status to apply to the group.
        status: SplitTenderStatus,
    },

    /// Retrieve every customer profile id known to the gateway.
    RetrieveAll,

    /// Retrieve a single customer profile with its sub-profiles.
    Retrieve {
        /// The gateway-assigned customer profile id.
        profile_id: u64,
    },

    /// Retrieve a single billing sub-profile.
    RetrieveBilling {
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned billing sub-profile id.
        billing_id: u64,
    },

    /// Retrieve a single shipping address.
    RetrieveShipping {
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned shipping address id.
        shipping_id: u64,
    },

    /// Delete a customer profile.
    Delete {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
    },

    /// Delete a billing sub-profile.
    DeleteBilling {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned billing sub-profile id.
        billing_id: u64,
    },

    /// Delete a shipping address.
    DeleteShipping {
        /// Caller-supplied reference id echoed back in the reply.
        ref_id: Option<String>,
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned shipping address id.
        shipping_id: u64,
    },

    /// Validate a billing sub-profile with a test or live authorization.
    Validate {
        /// The gateway-assigned customer profile id.
        profile_id: u64,
        /// The gateway-assigned billing sub-profile id.
        billing_id: u64,
        /// The gateway-assigned shipping address id, if any.
        shipping_id: Option<u64>,
        /// Card verification code to include in the validation.
        card_code: Option<String>,
        /// Validation mode for the request.
        validation: ValidationMode,
    },
}

/// The single entry type for classification and encoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum GatewayRequest {
    /// A single payment transaction (flat wire format).
    Transaction(TransactionRequest),
    /// A recurring-billing operation (markup wire format).
    Subscription(SubscriptionRequest),
    /// A customer-profile operation (markup wire format).
    Profile(ProfileRequest),
}
