//! # payrs
//!
//! A Rust translation layer for the Authorize.Net payment gateway wire
//! formats: single transactions (AIM), recurring billing (ARB), and
//! stored customer profiles (CIM).
//!
//! The crate is a pure codec. Callers build typed request values, encode
//! them into the exact bytes the gateway expects, move those bytes over
//! whatever transport they already have, and decode the gateway's reply
//! bytes back into typed values. No networking, persistence, or
//! validation policy lives here.
//!
//! ## Features
//!
//! - **Transactions**: flat urlencoded requests and positional reply
//!   decoding, including MD5 authenticity verification
//! - **Subscriptions**: create, update, status, and cancel documents
//! - **Customer profiles**: the full profile, billing sub-profile,
//!   shipping address, stored-profile transaction, and split tender
//!   operation set
//! - **Closed dispatch**: every request variant classifies to exactly one
//!   operation, or fails fast with a typed error
//!
//! ## Quick Start
//!
//! ```rust
//! use payrs::encode;
//! use payrs::types::{
//!     Card, GatewayRequest, MerchantAuthentication, PaymentInstrument,
//!     TransactionRequest,
//! };
//!
//! let auth = MerchantAuthentication::new("api_login", "transaction_key");
//! let request = GatewayRequest::Transaction(TransactionRequest {
//!     amount: Some("25.00".to_string()),
//!     payment: Some(PaymentInstrument::Card(Card {
//!         number: "4111111111111111".to_string(),
//!         expiration: chrono::NaiveDate::from_ymd_opt(2028, 4, 1).unwrap(),
//!         verification_code: None,
//!         brand: None,
//!     })),
//!     ..Default::default()
//! });
//!
//! let encoded = encode::encode(&auth, &request)?;
//! assert_eq!(encoded.content_type(), "application/x-www-form-urlencoded");
//! assert!(encoded.body.contains("x_amount=25.00"));
//! # Ok::<(), payrs::errors::GatewayError>(())
//! ```
//!
//! Decoding the gateway's answer:
//!
//! ```rust
//! use payrs::decode::TransactionReply;
//!
//! let reply = TransactionReply::parse(
//!     "1|1|1|This transaction has been approved.|ABC123|Y|2147490176|||25.00",
//!     '|',
//! )?;
//! assert!(reply.is_approved());
//! # Ok::<(), payrs::errors::GatewayError>(())
//! ```
//!
//! ## Wire families
//!
//! The gateway speaks two syntaxes, and the reply always mirrors the
//! request:
//!
//! 1. **Flat**: percent-encoded `key=value&...` bodies with positional
//!    delimiter-separated replies, used for single transactions
//! 2. **Markup**: XML documents whose root element names the operation,
//!    used for subscription and profile work
//!
//! [`registry::classify`] picks the operation and family for a request;
//! [`encode::encode`] runs classification and body production in one
//! step.

#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod errors;
pub mod registry;
pub mod types;

pub use decode::{ProfileReply, SubscriptionReply, TransactionReply};
pub use encode::{encode as encode_request, EncodedRequest};
pub use errors::{GatewayError, Result};
pub use registry::{classify, Operation, WireFamily};
pub use types::{GatewayRequest, MerchantAuthentication};
