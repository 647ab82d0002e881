//! Request encoding.
//!
//! Turns a classified request into the exact byte body the gateway
//! expects, in one of two wire families: a flat urlencoded key/value body
//! for single transactions, or a markup document for subscription and
//! profile operations.

pub mod flat;
pub mod markup;

use tracing::debug;

use crate::errors::Result;
use crate::registry::{self, Operation, WireFamily};
use crate::types::{GatewayRequest, MerchantAuthentication};

/// A fully encoded request, ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// The operation this body encodes.
    pub operation: Operation,

    /// The wire body.
    pub body: String,
}

impl EncodedRequest {
    /// The HTTP content type matching this body's wire family.
    pub fn content_type(&self) -> &'static str {
        match self.operation.family {
            WireFamily::UrlEncoded => "application/x-www-form-urlencoded",
            WireFamily::Xml => "text/xml",
        }
    }
}

/// Classifies and encodes a request in one step.
///
/// The request is first run through the variant registry, which both
/// selects the operation and rejects internally inconsistent requests;
/// only then is a body produced.
///
/// # Examples
///
/// ```
/// use payrs::encode;
/// use payrs::types::{GatewayRequest, MerchantAuthentication, ProfileRequest};
///
/// let auth = MerchantAuthentication::new("api_login", "transaction_key");
/// let request = GatewayRequest::Profile(ProfileRequest::RetrieveAll);
///
/// let encoded = encode::encode(&auth, &request)?;
/// assert_eq!(encoded.operation.id, "retrieve");
/// assert_eq!(encoded.content_type(), "text/xml");
/// # Ok::<(), payrs::errors::GatewayError>(())
/// ```
pub fn encode(auth: &MerchantAuthentication, request: &GatewayRequest) -> Result<EncodedRequest> {
    let operation = registry::classify(request)?;
    debug!(operation = operation.id, "encoding request");

    let body = match request {
        GatewayRequest::Transaction(transaction) => flat::encode_transaction(auth, transaction)?,
        GatewayRequest::Subscription(subscription) => {
            markup::encode_subscription(auth, subscription, operation.root)?
        }
        GatewayRequest::Profile(profile) => {
            markup::encode_profile(auth, profile, operation.root)?
        }
    };

    Ok(EncodedRequest { operation, body })
}
