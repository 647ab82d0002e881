//! Flat transaction reply decoding.
//!
//! A transaction reply is a single line of delimiter-separated fields in
//! a fixed positional order. Positions past the end of the line decode as
//! absent, as do empty fields, so replies from gateways configured with a
//! shorter field set still decode.

use md5::{Digest, Md5};
use tracing::debug;

use crate::errors::{GatewayError, Result};
use crate::types::Address;

/// The overall outcome of a transaction, from the first reply field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// The transaction was approved.
    Approved,
    /// The transaction was declined.
    Declined,
    /// The gateway reported an error.
    Error,
    /// The transaction is held for manual review.
    Held,
}

impl TransactionStatus {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            1 => Ok(TransactionStatus::Approved),
            2 => Ok(TransactionStatus::Declined),
            3 => Ok(TransactionStatus::Error),
            4 => Ok(TransactionStatus::Held),
            other => Err(GatewayError::UnknownStatusCode(other)),
        }
    }
}

/// A decoded transaction reply.
///
/// Field meanings follow the gateway's positional reply layout. Every
/// field except the status is optional; an empty wire field decodes as
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReply {
    /// Overall transaction outcome.
    pub status: TransactionStatus,
    /// Numeric status code the outcome was derived from.
    pub status_code: u32,
    /// Gateway-assigned response subcode.
    pub subcode: Option<String>,
    /// Numeric reason code giving more detail on the outcome.
    pub reason_code: Option<String>,
    /// Human-readable reason text.
    pub reason: Option<String>,
    /// Authorization or approval code.
    pub approval_code: Option<String>,
    /// Address verification service response code.
    pub avs_code: Option<String>,
    /// Gateway-assigned transaction id.
    pub transaction_id: Option<String>,
    /// Echoed invoice number.
    pub invoice: Option<String>,
    /// Echoed transaction description.
    pub description: Option<String>,
    /// Echoed amount.
    pub amount: Option<String>,
    /// Payment method (`CC` or `ECHECK`).
    pub method: Option<String>,
    /// Echoed transaction type token.
    pub transaction_type: Option<String>,
    /// Echoed merchant-assigned customer id.
    pub customer_id: Option<String>,
    /// Echoed billing address.
    pub billing: Address,
    /// Echoed customer email address.
    pub email: Option<String>,
    /// Echoed shipping address.
    pub shipping: Address,
    /// Echoed tax amount.
    pub tax: Option<String>,
    /// Echoed duty amount.
    pub duty: Option<String>,
    /// Echoed freight amount.
    pub freight: Option<String>,
    /// Echoed tax-exempt flag.
    pub tax_exempt: Option<String>,
    /// Echoed purchase order number.
    pub purchase_order: Option<String>,
    /// Gateway-computed authenticity hash.
    pub hash: Option<String>,
    /// Card code (CCV) verification response.
    pub card_code_response: Option<String>,
    /// Cardholder authentication verification response.
    pub cavv_response: Option<String>,
    /// Masked account number.
    pub account_number: Option<String>,
    /// Card type name.
    pub card_type: Option<String>,
    /// Gateway-assigned split tender id.
    pub split_tender_id: Option<String>,
    /// Amount requested in a partial authorization.
    pub requested_amount: Option<String>,
    /// Balance remaining on the card after a partial authorization.
    pub balance: Option<String>,
}

impl TransactionReply {
    /// Parses a reply line split on `delimiter`.
    ///
    /// The delimiter must match the one requested when the transaction
    /// was encoded. Fails when the line carries fewer than four fields
    /// or when the status field is not a known status code.
    pub fn parse(data: &str, delimiter: char) -> Result<Self> {
        let fields: Vec<&str> = data.split(delimiter).collect();
        if fields.len() < 4 {
            return Err(GatewayError::Decode(format!(
                "transaction reply carries {} fields, expected at least 4",
                fields.len()
            )));
        }

        let status_code: u32 = fields[0].trim().parse().map_err(|_| {
            GatewayError::Decode(format!("non-numeric status field {:?}", fields[0]))
        })?;
        let status = TransactionStatus::from_code(status_code)?;

        let field = |index: usize| -> Option<String> {
            fields
                .get(index)
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string())
        };

        let billing = Address {
            first_name: field(13),
            last_name: field(14),
            company: field(15),
            street: field(16),
            city: field(17),
            region: field(18),
            postal_code: field(19),
            country: field(20),
            phone: field(21),
            fax: field(22),
        };
        let shipping = Address {
            first_name: field(24),
            last_name: field(25),
            company: field(26),
            street: field(27),
            city: field(28),
            region: field(29),
            postal_code: field(30),
            country: field(31),
            phone: None,
            fax: None,
        };

        debug!(status_code, fields = fields.len(), "decoded transaction reply");

        Ok(TransactionReply {
            status,
            status_code,
            subcode: field(1),
            reason_code: field(2),
            reason: field(3),
            approval_code: field(4),
            avs_code: field(5),
            transaction_id: field(6),
            invoice: field(7),
            description: field(8),
            amount: field(9),
            method: field(10),
            transaction_type: field(11),
            customer_id: field(12),
            billing,
            email: field(23),
            shipping,
            tax: field(32),
            duty: field(33),
            freight: field(34),
            tax_exempt: field(35),
            purchase_order: field(36),
            hash: field(37),
            card_code_response: field(38),
            cavv_response: field(39),
            account_number: field(40),
            card_type: field(41),
            split_tender_id: field(42),
            requested_amount: field(43),
            balance: field(44),
        })
    }

    /// Returns true when the transaction was approved.
    pub fn is_approved(&self) -> bool {
        self.status == TransactionStatus::Approved
    }

    /// Verifies the reply's authenticity hash.
    ///
    /// The gateway computes an MD5 digest over the merchant hash salt,
    /// the API login, the transaction id, and the amount, in that order.
    /// Absent transaction id or amount contribute nothing to the digest.
    /// A reply without a hash field is never authentic.
    pub fn is_authentic(&self, salt: &str, login: &str) -> bool {
        let hash = match &self.hash {
            Some(hash) => hash,
            None => return false,
        };

        let mut digest = Md5::new();
        digest.update(salt.as_bytes());
        digest.update(login.as_bytes());
        if let Some(transaction_id) = &self.transaction_id {
            digest.update(transaction_id.as_bytes());
        }
        if let Some(amount) = &self.amount {
            digest.update(amount.as_bytes());
        }
        let expected = hex::encode(digest.finalize());

        expected.eq_ignore_ascii_case(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPROVED: &str = "1|1|1|This transaction has been approved.|ABC123|Y|2147490176|INV-1001|an order|25.00|CC|auth_capture|cust-24|Richard|Branson|Virgin|1 Main St|Carlsbad|CA|92009|US|760-555-0100||customer@example.com|||||||||2.50||0.75|FALSE|PO-9|68B37B6B7ED4E0E0F7C042B74F951EFB|M|2|XXXX1111|Visa|||";

    #[test]
    fn test_parse_approved_reply() {
        let reply = TransactionReply::parse(APPROVED, '|').unwrap();

        assert_eq!(reply.status, TransactionStatus::Approved);
        assert!(reply.is_approved());
        assert_eq!(reply.reason.as_deref(), Some("This transaction has been approved."));
        assert_eq!(reply.approval_code.as_deref(), Some("ABC123"));
        assert_eq!(reply.transaction_id.as_deref(), Some("2147490176"));
        assert_eq!(reply.amount.as_deref(), Some("25.00"));
        assert_eq!(reply.billing.first_name.as_deref(), Some("Richard"));
        assert_eq!(reply.billing.postal_code.as_deref(), Some("92009"));
        assert_eq!(reply.email.as_deref(), Some("customer@example.com"));
        assert!(reply.shipping.is_empty());
        assert_eq!(reply.tax.as_deref(), Some("2.50"));
        assert_eq!(reply.card_type.as_deref(), Some("Visa"));
        assert!(reply.split_tender_id.is_none());
    }

    #[test]
    fn test_empty_fields_decode_as_absent() {
        let reply = TransactionReply::parse("2|||This transaction has been declined.", '|').unwrap();
        assert_eq!(reply.status, TransactionStatus::Declined);
        assert!(reply.subcode.is_none());
        assert!(reply.reason_code.is_none());
        assert!(reply.transaction_id.is_none());
        assert!(reply.hash.is_none());
        assert!(reply.billing.is_empty());
    }

    #[test]
    fn test_alternate_delimiter() {
        let reply = TransactionReply::parse("3;;;err", ';').unwrap();
        assert_eq!(reply.status, TransactionStatus::Error);
        assert_eq!(reply.reason.as_deref(), Some("err"));
    }

    #[test]
    fn test_short_reply_is_rejected() {
        assert!(matches!(
            TransactionReply::parse("1|1|1", '|'),
            Err(GatewayError::Decode(_))
        ));
    }

    #[test]
    fn test_unknown_status_code() {
        assert!(matches!(
            TransactionReply::parse("9|||x", '|'),
            Err(GatewayError::UnknownStatusCode(9))
        ));
    }

    #[test]
    fn test_non_numeric_status() {
        assert!(matches!(
            TransactionReply::parse("ok|||x", '|'),
            Err(GatewayError::Decode(_))
        ));
    }

    #[test]
    fn test_authenticity_hash() {
        let mut digest = Md5::new();
        digest.update(b"saltsalt");
        digest.update(b"auth_login");
        digest.update(b"2147490176");
        digest.update(b"25.00");
        let hash = hex::encode(digest.finalize()).to_uppercase();

        let mut fields = vec!["1", "1", "1", "ok", "", "Y", "2147490176", "", "", "25.00"];
        fields.resize(37, "");
        fields.push(&hash);
        let line = fields.join("|");
        let reply = TransactionReply::parse(&line, '|').unwrap();
        assert_eq!(reply.hash.as_deref(), Some(hash.as_str()));
        assert!(reply.is_authentic("saltsalt", "auth_login"));
        assert!(!reply.is_authentic("other_salt", "auth_login"));
        assert!(!reply.is_authentic("saltsalt", "other_login"));
    }

    #[test]
    fn test_missing_hash_is_never_authentic() {
        let reply = TransactionReply::parse("1|1|1|ok||Y|2147490176|||25.00", '|').unwrap();
        assert!(!reply.is_authentic("saltsalt", "auth_login"));
    }
}
