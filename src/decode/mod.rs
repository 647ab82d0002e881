//! Reply decoding.
//!
//! The gateway answers in the same wire family the request was sent in:
//! flat delimiter-separated lines for single transactions, markup
//! documents for subscription and profile operations. Each decoder is
//! total over its family; malformed input fails with
//! [`GatewayError::Decode`](crate::errors::GatewayError::Decode) rather
//! than producing a partial reply.

pub mod flat;
pub mod markup;
mod xml;

pub use flat::{TransactionReply, TransactionStatus};
pub use markup::{
    BillingRecord, CustomerRecord, IdIter, Messages, PaymentRecord, ProfileDetail, ProfileReply,
    ShippingRecord, SubscriptionReply, SUCCESS_CODE,
};
