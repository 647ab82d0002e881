//! Markup reply decoding.
//!
//! Subscription and profile replies arrive as XML documents whose root
//! element names the operation they answer. Decoding dispatches on that
//! root over a closed set of known reply shapes; an unrecognized root
//! falls back to the shared result block, since every reply carries one.

use tracing::debug;

use crate::decode::flat::TransactionReply;
use crate::decode::xml::Element;
use crate::errors::{GatewayError, Result};
use crate::types::Address;

/// The message code the gateway sends on success.
pub const SUCCESS_CODE: &str = "I00001";

/// The result block present in every markup reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Overall result token (`Ok` or `Error`).
    pub result_code: String,
    /// Machine-readable message code.
    pub code: String,
    /// Human-readable message text.
    pub text: String,
}

impl Messages {
    fn decode(root: &Element) -> Result<Messages> {
        let messages = root
            .child("messages")
            .ok_or_else(|| GatewayError::Decode("reply carries no messages block".to_string()))?;
        let message = messages
            .child("message")
            .ok_or_else(|| GatewayError::Decode("messages block carries no message".to_string()))?;

        Ok(Messages {
            result_code: messages.child_text("resultCode").ok_or_else(|| {
                GatewayError::Decode("messages block carries no result code".to_string())
            })?,
            code: message
                .child_text("code")
                .ok_or_else(|| GatewayError::Decode("message carries no code".to_string()))?,
            text: message
                .child_text("text")
                .ok_or_else(|| GatewayError::Decode("message carries no text".to_string()))?,
        })
    }

    /// Returns true when the gateway accepted the request.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// A decoded recurring-billing reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionReply {
    /// The result block.
    pub messages: Messages,
    /// Echoed caller reference id.
    pub ref_id: Option<String>,
    /// Gateway-assigned subscription id, present on creation replies.
    pub subscription_id: Option<String>,
    /// Subscription status text, present on status replies. Trimmed, with
    /// the first letter capitalized.
    pub status: Option<String>,
}

impl SubscriptionReply {
    /// Parses a recurring-billing reply document.
    pub fn parse(document: &str) -> Result<SubscriptionReply> {
        let root = Element::parse(document)?;
        debug!(root = %root.name, "decoding subscription reply");

        let messages = Messages::decode(&root)?;
        let ref_id = root.child_text("refId");

        // An unrecognized root still decodes: the result block is shared
        // by every reply shape, so it falls back to a bare reply.
        let (subscription_id, status) = match root.name.as_str() {
            "ARBCreateSubscriptionResponse" => (root.child_text("subscriptionId"), None),
            "ARBGetSubscriptionStatusResponse" => {
                // The gateway emits a capitalized Status element; some
                // replies carry it lowercase.
                let status = root
                    .child_text("Status")
                    .or_else(|| root.child_text("status"));
                (None, status.map(|s| capitalize(s.trim())))
            }
            _ => (None, None),
        };

        Ok(SubscriptionReply {
            messages,
            ref_id,
            subscription_id,
            status,
        })
    }
}

// First letter uppercased, remainder lowercased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

/// A stored payment instrument as echoed in profile replies. Account
/// numbers come back masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentRecord {
    /// A stored credit card.
    Card {
        /// Masked card number.
        number: String,
        /// Masked expiration date.
        expiration: Option<String>,
    },
    /// A stored bank account.
    Bank {
        /// Bank routing number.
        routing_number: Option<String>,
        /// Masked account number.
        account_number: Option<String>,
        /// Account holder's name.
        holder_name: Option<String>,
    },
}

/// A billing sub-profile as stored at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingRecord {
    /// Gateway-assigned billing sub-profile id.
    pub billing_id: Option<u64>,
    /// Customer entity type token.
    pub entity_type: Option<String>,
    /// The billing address.
    pub address: Address,
    /// The stored payment instrument.
    pub payment: Option<PaymentRecord>,
}

/// A shipping address as stored at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRecord {
    /// Gateway-assigned shipping address id.
    pub shipping_id: Option<u64>,
    /// The address.
    pub address: Address,
}

/// A full customer profile as stored at the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    /// Gateway-assigned customer profile id.
    pub profile_id: Option<u64>,
    /// Merchant-assigned customer identifier.
    pub customer_id: Option<String>,
    /// Profile description.
    pub description: Option<String>,
    /// The customer's email address.
    pub email: Option<String>,
    /// Billing sub-profiles in document order.
    pub billing: Vec<BillingRecord>,
    /// Shipping addresses in document order.
    pub shipping: Vec<ShippingRecord>,
}

/// The operation-specific payload of a profile reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDetail {
    /// A reply carrying no payload beyond the result block.
    Generic,

    /// Reply to profile creation.
    ProfileCreated {
        /// Billing sub-profile ids assigned, in request order.
        payment_ids: Vec<u64>,
        /// Shipping address ids assigned, in request order.
        shipping_ids: Vec<u64>,
        /// Validation receipts, one per billing sub-profile validated.
        validation: Vec<TransactionReply>,
    },

    /// Reply to billing sub-profile creation.
    BillingCreated {
        /// The assigned billing sub-profile id.
        billing_id: Option<u64>,
        /// Validation receipt, when a validation mode was requested.
        validation: Option<TransactionReply>,
    },

    /// Reply to shipping address creation.
    ShippingCreated {
        /// The assigned shipping address id.
        shipping_id: Option<u64>,
    },

    /// Reply to a transaction run against a stored profile.
    TransactionCreated {
        /// The embedded transaction receipt.
        receipt: TransactionReply,
    },

    /// Reply to a billing sub-profile update.
    BillingUpdated {
        /// Validation receipt, when a validation mode was requested.
        validation: Option<TransactionReply>,
    },

    /// Reply to an explicit validation request.
    Validated {
        /// The validation receipt.
        validation: Option<TransactionReply>,
    },

    /// Reply listing every customer profile id.
    IdList {
        /// The ids, in document order.
        ids: Vec<u64>,
    },

    /// Reply carrying a full customer profile.
    Profile(CustomerRecord),

    /// Reply carrying a single billing sub-profile.
    Billing(BillingRecord),

    /// Reply carrying a single shipping address.
    Shipping(ShippingRecord),
}

/// A decoded customer-profile reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileReply {
    /// The result block.
    pub messages: Messages,
    /// Echoed caller reference id.
    pub ref_id: Option<String>,
    /// Gateway-assigned customer profile id, when the reply carries one
    /// at the top level.
    pub profile_id: Option<u64>,
    /// The operation-specific payload.
    pub detail: ProfileDetail,
}

/// Delimiter used inside validation receipt strings.
const VALIDATION_DELIMITER: char = ',';
/// Delimiter used inside transaction receipt strings.
const RECEIPT_DELIMITER: char = '|';

impl ProfileReply {
    /// Parses a customer-profile reply document, dispatching on the root
    /// element name.
    pub fn parse(document: &str) -> Result<ProfileReply> {
        let root = Element::parse(document)?;
        debug!(root = %root.name, "decoding profile reply");

        let messages = Messages::decode(&root)?;
        let ref_id = root.child_text("refId");
        let profile_id = child_id(&root, "customerProfileId");

        let detail = match root.name.as_str() {
            "createCustomerProfileResponse" => ProfileDetail::ProfileCreated {
                payment_ids: id_list(&root, "customerPaymentProfileIdList"),
                shipping_ids: id_list(&root, "customerShippingAddressIdList"),
                validation: string_list(&root, "validationDirectResponseList")
                    .iter()
                    .map(|raw| TransactionReply::parse(raw, VALIDATION_DELIMITER))
                    .collect::<Result<Vec<_>>>()?,
            },

            "createCustomerPaymentProfileResponse" => ProfileDetail::BillingCreated {
                billing_id: child_id(&root, "customerPaymentProfileId"),
                validation: decode_validation(&root)?,
            },

            "createCustomerShippingAddressResponse" => ProfileDetail::ShippingCreated {
                shipping_id: child_id(&root, "customerAddressId"),
            },

            "createCustomerProfileTransactionResponse" => {
                let raw = root.child_text("directResponse").ok_or_else(|| {
                    GatewayError::Decode("transaction reply carries no receipt".to_string())
                })?;
                ProfileDetail::TransactionCreated {
                    receipt: TransactionReply::parse(&raw, RECEIPT_DELIMITER)?,
                }
            }

            "updateCustomerPaymentProfileResponse" => ProfileDetail::BillingUpdated {
                validation: decode_validation(&root)?,
            },

            "validateCustomerPaymentProfileResponse" => ProfileDetail::Validated {
                validation: match root.child_text("directResponse") {
                    Some(raw) => Some(TransactionReply::parse(&raw, VALIDATION_DELIMITER)?),
                    None => None,
                },
            },

            "getCustomerProfileIdsResponse" => ProfileDetail::IdList {
                ids: id_list(&root, "ids"),
            },

            "getCustomerProfileResponse" => {
                let profile = root.child("profile").ok_or_else(|| {
                    GatewayError::Decode("profile reply carries no profile".to_string())
                })?;
                ProfileDetail::Profile(decode_customer(profile))
            }

            "getCustomerPaymentProfileResponse" => {
                let payment_profile = root.child("paymentProfile").ok_or_else(|| {
                    GatewayError::Decode("reply carries no payment profile".to_string())
                })?;
                ProfileDetail::Billing(decode_billing(payment_profile))
            }

            "getCustomerShippingAddressResponse" => {
                let address = root.child("address").ok_or_else(|| {
                    GatewayError::Decode("reply carries no address".to_string())
                })?;
                ProfileDetail::Shipping(decode_shipping(address))
            }

            // Update, delete, split-tender, and any unrecognized root all
            // reduce to the shared result block.
            _ => ProfileDetail::Generic,
        };

        Ok(ProfileReply {
            messages,
            ref_id,
            profile_id,
            detail,
        })
    }

    /// Number of records this reply represents: the id count for an id
    /// list, otherwise one record on success and zero on failure.
    pub fn count(&self) -> usize {
        match &self.detail {
            ProfileDetail::IdList { ids } => ids.len(),
            _ if self.messages.is_success() => 1,
            _ => 0,
        }
    }

    /// The profile ids carried by an id-list reply; empty otherwise.
    pub fn ids(&self) -> &[u64] {
        match &self.detail {
            ProfileDetail::IdList { ids } => ids,
            _ => &[],
        }
    }

    /// Returns a fresh iterator over the ids of an id-list reply.
    ///
    /// Each call restarts from the first id; the reply itself holds the
    /// ids and is never consumed by iteration.
    pub fn iter_ids(&self) -> IdIter<'_> {
        IdIter {
            ids: self.ids(),
            position: 0,
        }
    }
}

/// A restartable view over the ids of an id-list reply.
#[derive(Debug, Clone)]
pub struct IdIter<'a> {
    ids: &'a [u64],
    position: usize,
}

impl Iterator for IdIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let id = self.ids.get(self.position).copied()?;
        self.position += 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ids.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IdIter<'_> {}

fn child_id(element: &Element, name: &str) -> Option<u64> {
    element.child_text(name).and_then(|t| t.parse().ok())
}

fn id_list(root: &Element, wrapper: &str) -> Vec<u64> {
    match root.child(wrapper) {
        Some(list) => list
            .children_named("numericString")
            .filter_map(|e| e.text.parse().ok())
            .collect(),
        None => Vec::new(),
    }
}

fn string_list(root: &Element, wrapper: &str) -> Vec<String> {
    match root.child(wrapper) {
        Some(list) => list
            .children_named("string")
            .map(|e| e.text.clone())
            .collect(),
        None => Vec::new(),
    }
}

fn decode_validation(root: &Element) -> Result<Option<TransactionReply>> {
    match root.child_text("validationDirectResponse") {
        Some(raw) => Ok(Some(TransactionReply::parse(&raw, VALIDATION_DELIMITER)?)),
        None => Ok(None),
    }
}

fn decode_address(element: &Element) -> Address {
    Address {
        first_name: element.child_text("firstName"),
        last_name: element.child_text("lastName"),
        company: element.child_text("company"),
        street: element.child_text("address"),
        city: element.child_text("city"),
        region: element.child_text("state"),
        postal_code: element.child_text("zip"),
        country: element.child_text("country"),
        phone: element.child_text("phoneNumber"),
        fax: element.child_text("faxNumber"),
    }
}

fn decode_payment(element: &Element) -> Option<PaymentRecord> {
    let payment = element.child("payment")?;
    if let Some(card) = payment.child("creditCard") {
        return Some(PaymentRecord::Card {
            number: card.child_text("cardNumber").unwrap_or_default(),
            expiration: card.child_text("expirationDate"),
        });
    }
    let bank = payment.child("bankAccount")?;
    Some(PaymentRecord::Bank {
        routing_number: bank.child_text("routingNumber"),
        account_number: bank.child_text("accountNumber"),
        holder_name: bank.child_text("nameOnAccount"),
    })
}

fn decode_billing(element: &Element) -> BillingRecord {
    BillingRecord {
        billing_id: child_id(element, "customerPaymentProfileId"),
        entity_type: element.child_text("customerType"),
        address: element
            .child("billTo")
            .map(decode_address)
            .unwrap_or_default(),
        payment: decode_payment(element),
    }
}

fn decode_shipping(element: &Element) -> ShippingRecord {
    ShippingRecord {
        shipping_id: child_id(element, "customerAddressId"),
        address: decode_address(element),
    }
}

fn decode_customer(element: &Element) -> CustomerRecord {
    CustomerRecord {
        profile_id: child_id(element, "customerProfileId"),
        customer_id: element.child_text("merchantCustomerId"),
        description: element.child_text("description"),
        email: element.child_text("email"),
        billing: element
            .children_named("paymentProfiles")
            .map(decode_billing)
            .collect(),
        shipping: element
            .children_named("shipToList")
            .map(decode_shipping)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES_OK: &str = "<messages><resultCode>Ok</resultCode>\
        <message><code>I00001</code><text>Successful.</text></message></messages>";

    fn validation_receipt() -> String {
        "1,1,1,This transaction has been approved.,000000,P,0,none,Test transaction,\
         0.00,CC,auth_only,24,,,,,,,,,,,customer@example.com"
            .to_string()
    }

    #[test]
    fn test_messages_failure() {
        let document = "<createCustomerProfileResponse><messages>\
             <resultCode>Error</resultCode>\
             <message><code>E00039</code><text>A duplicate record already exists.</text>\
             </message></messages></createCustomerProfileResponse>";
        let reply = ProfileReply::parse(document).unwrap();
        assert!(!reply.messages.is_success());
        assert_eq!(reply.messages.code, "E00039");
        assert_eq!(reply.count(), 0);
    }

    #[test]
    fn test_subscription_create_reply() {
        let document = format!(
            "<ARBCreateSubscriptionResponse>{MESSAGES_OK}\
             <subscriptionId>100748</subscriptionId></ARBCreateSubscriptionResponse>"
        );
        let reply = SubscriptionReply::parse(&document).unwrap();
        assert!(reply.messages.is_success());
        assert_eq!(reply.subscription_id.as_deref(), Some("100748"));
        assert!(reply.status.is_none());
    }

    #[test]
    fn test_subscription_status_capitalized_element() {
        let document = format!(
            "<ARBGetSubscriptionStatusResponse>{MESSAGES_OK}\
             <Status>active</Status></ARBGetSubscriptionStatusResponse>"
        );
        let reply = SubscriptionReply::parse(&document).unwrap();
        assert_eq!(reply.status.as_deref(), Some("Active"));
    }

    #[test]
    fn test_subscription_status_lowercase_fallback() {
        let document = format!(
            "<ARBGetSubscriptionStatusResponse>{MESSAGES_OK}\
             <status>  active  </status></ARBGetSubscriptionStatusResponse>"
        );
        let reply = SubscriptionReply::parse(&document).unwrap();
        assert_eq!(reply.status.as_deref(), Some("Active"));
    }

    #[test]
    fn test_status_text_is_capitalized_and_tail_lowered() {
        let document = format!(
            "<ARBGetSubscriptionStatusResponse>{MESSAGES_OK}\
             <Status>ACTIVE</Status></ARBGetSubscriptionStatusResponse>"
        );
        let reply = SubscriptionReply::parse(&document).unwrap();
        assert_eq!(reply.status.as_deref(), Some("Active"));
    }

    #[test]
    fn test_unknown_subscription_root_decodes_bare() {
        let document = format!("<ARBSomethingElseResponse>{MESSAGES_OK}</ARBSomethingElseResponse>");
        let reply = SubscriptionReply::parse(&document).unwrap();
        assert!(reply.messages.is_success());
        assert!(reply.subscription_id.is_none());
        assert!(reply.status.is_none());
    }

    #[test]
    fn test_profile_created_reply() {
        let receipt = validation_receipt();
        let document = format!(
            "<createCustomerProfileResponse>{MESSAGES_OK}\
             <customerProfileId>4927351</customerProfileId>\
             <customerPaymentProfileIdList>\
             <numericString>3187</numericString><numericString>3188</numericString>\
             </customerPaymentProfileIdList>\
             <customerShippingAddressIdList><numericString>9241</numericString>\
             </customerShippingAddressIdList>\
             <validationDirectResponseList><string>{receipt}</string>\
             </validationDirectResponseList>\
             </createCustomerProfileResponse>"
        );
        let reply = ProfileReply::parse(&document).unwrap();

        assert_eq!(reply.profile_id, Some(4927351));
        assert_eq!(reply.count(), 1);
        match &reply.detail {
            ProfileDetail::ProfileCreated {
                payment_ids,
                shipping_ids,
                validation,
            } => {
                assert_eq!(payment_ids, &[3187, 3188]);
                assert_eq!(shipping_ids, &[9241]);
                assert_eq!(validation.len(), 1);
                assert!(validation[0].is_approved());
                assert_eq!(
                    validation[0].email.as_deref(),
                    Some("customer@example.com")
                );
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_billing_created_reply() {
        let receipt = validation_receipt();
        let document = format!(
            "<createCustomerPaymentProfileResponse>{MESSAGES_OK}\
             <customerProfileId>4927351</customerProfileId>\
             <customerPaymentProfileId>3189</customerPaymentProfileId>\
             <validationDirectResponse>{receipt}</validationDirectResponse>\
             </createCustomerPaymentProfileResponse>"
        );
        let reply = ProfileReply::parse(&document).unwrap();
        match &reply.detail {
            ProfileDetail::BillingCreated {
                billing_id,
                validation,
            } => {
                assert_eq!(*billing_id, Some(3189));
                assert!(validation.as_ref().unwrap().is_approved());
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_transaction_receipt_reply() {
        let document = format!(
            "<createCustomerProfileTransactionResponse>{MESSAGES_OK}\
             <directResponse>1|1|1|This transaction has been approved.|ABC123|Y|2147490176\
             |INV-1001||25.00|CC|auth_capture|24</directResponse>\
             </createCustomerProfileTransactionResponse>"
        );
        let reply = ProfileReply::parse(&document).unwrap();
        match &reply.detail {
            ProfileDetail::TransactionCreated { receipt } => {
                assert!(receipt.is_approved());
                assert_eq!(receipt.transaction_id.as_deref(), Some("2147490176"));
                assert_eq!(receipt.amount.as_deref(), Some("25.00"));
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_id_list_reply_and_iteration() {
        let document = format!(
            "<getCustomerProfileIdsResponse>{MESSAGES_OK}\
             <ids><numericString>10</numericString><numericString>20</numericString>\
             <numericString>30</numericString></ids>\
             </getCustomerProfileIdsResponse>"
        );
        let reply = ProfileReply::parse(&document).unwrap();

        assert_eq!(reply.count(), 3);
        assert_eq!(reply.ids(), &[10, 20, 30]);

        // Each call yields a fresh pass over the same ids.
        let first: Vec<u64> = reply.iter_ids().collect();
        let second: Vec<u64> = reply.iter_ids().collect();
        assert_eq!(first, second);
        assert_eq!(reply.iter_ids().len(), 3);
    }

    #[test]
    fn test_full_profile_reply() {
        let document = format!(
            "<getCustomerProfileResponse>{MESSAGES_OK}<profile>\
             <merchantCustomerId>24</merchantCustomerId>\
             <description>A customer profile</description>\
             <email>customer@example.com</email>\
             <customerProfileId>4927351</customerProfileId>\
             <paymentProfiles><customerPaymentProfileId>3187</customerPaymentProfileId>\
             <customerType>individual</customerType>\
             <billTo><firstName>Richard</firstName><zip>92009</zip></billTo>\
             <payment><creditCard><cardNumber>XXXX1111</cardNumber>\
             <expirationDate>XXXX</expirationDate></creditCard></payment>\
             </paymentProfiles>\
             <shipToList><customerAddressId>9241</customerAddressId>\
             <city>Carlsbad</city></shipToList>\
             </profile></getCustomerProfileResponse>"
        );
        let reply = ProfileReply::parse(&document).unwrap();

        match &reply.detail {
            ProfileDetail::Profile(record) => {
                assert_eq!(record.profile_id, Some(4927351));
                assert_eq!(record.customer_id.as_deref(), Some("24"));
                assert_eq!(record.billing.len(), 1);
                assert_eq!(record.billing[0].billing_id, Some(3187));
                assert_eq!(
                    record.billing[0].address.first_name.as_deref(),
                    Some("Richard")
                );
                assert_eq!(
                    record.billing[0].payment,
                    Some(PaymentRecord::Card {
                        number: "XXXX1111".to_string(),
                        expiration: Some("XXXX".to_string()),
                    })
                );
                assert_eq!(record.shipping.len(), 1);
                assert_eq!(record.shipping[0].shipping_id, Some(9241));
                assert_eq!(record.shipping[0].address.city.as_deref(), Some("Carlsbad"));
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_single_billing_reply_with_bank_account() {
        let document = format!(
            "<getCustomerPaymentProfileResponse>{MESSAGES_OK}<paymentProfile>\
             <customerPaymentProfileId>3188</customerPaymentProfileId>\
             <payment><bankAccount><routingNumber>XXXX0724</routingNumber>\
             <accountNumber>XXXX4383</accountNumber>\
             <nameOnAccount>Richard M Branson</nameOnAccount></bankAccount></payment>\
             </paymentProfile></getCustomerPaymentProfileResponse>"
        );
        let reply = ProfileReply::parse(&document).unwrap();
        match &reply.detail {
            ProfileDetail::Billing(record) => {
                assert_eq!(record.billing_id, Some(3188));
                assert_eq!(
                    record.payment,
                    Some(PaymentRecord::Bank {
                        routing_number: Some("XXXX0724".to_string()),
                        account_number: Some("XXXX4383".to_string()),
                        holder_name: Some("Richard M Branson".to_string()),
                    })
                );
            }
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_delete_reply_is_generic() {
        let document =
            format!("<deleteCustomerProfileResponse>{MESSAGES_OK}</deleteCustomerProfileResponse>");
        let reply = ProfileReply::parse(&document).unwrap();
        assert_eq!(reply.detail, ProfileDetail::Generic);
        assert_eq!(reply.count(), 1);
        assert!(reply.ids().is_empty());
    }

    #[test]
    fn test_unknown_profile_root_decodes_as_generic() {
        let document = format!("<somethingElseResponse>{MESSAGES_OK}</somethingElseResponse>");
        let reply = ProfileReply::parse(&document).unwrap();
        assert_eq!(reply.detail, ProfileDetail::Generic);
        assert!(reply.messages.is_success());
    }

    #[test]
    fn test_reply_without_result_block_is_rejected() {
        assert!(matches!(
            ProfileReply::parse("<getCustomerProfileIdsResponse></getCustomerProfileIdsResponse>"),
            Err(GatewayError::Decode(_))
        ));
    }
}
