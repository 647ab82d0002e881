//! Flat key/value request encoder.
//!
//! Produces the percent-encoded `key=value&key=value...` body used by the
//! single-transaction capture operation. Keys come from the gateway's fixed
//! `x_`-prefixed vocabulary. Optional request fields are emitted only when
//! present: omission, not empty-string emission, is the contract.
//!
//! Repeating groups (line items and the tax/duty/freight singletons) cannot
//! share a key in a flat map, so they are appended after the encoded body as
//! delimited segments, one `&key=` per element, with `<|>` joining the
//! sub-fields within an element.

use tracing::debug;
use url::form_urlencoded;

use crate::errors::{GatewayError, Result};
use crate::types::{Address, MerchantAuthentication, PaymentInstrument, TransactionRequest};

/// API version token sent with every flat request.
pub const API_VERSION: &str = "3.1";

/// Field delimiter requested for the flat reply record.
pub const REPLY_DELIMITER: char = '|';

/// Inner delimiter joining sub-fields of one repeating-group element.
pub const GROUP_DELIMITER: &str = "<|>";

fn bool_token(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Encodes a transaction request into a flat percent-encoded body.
///
/// # Examples
///
/// ```
/// use payrs::encode::flat::encode_transaction;
/// use payrs::types::{Card, MerchantAuthentication, PaymentInstrument, TransactionRequest};
/// use chrono::NaiveDate;
///
/// let auth = MerchantAuthentication::new("login", "key");
/// let request = TransactionRequest {
///     amount: Some("9.99".to_string()),
///     payment: Some(PaymentInstrument::Card(Card {
///         number: "4111111111111111".to_string(),
///         expiration: NaiveDate::from_ymd_opt(2028, 4, 1).unwrap(),
///         verification_code: None,
///         brand: None,
///     })),
///     ..Default::default()
/// };
///
/// let body = encode_transaction(&auth, &request).unwrap();
/// assert!(body.contains("x_type=AUTH_CAPTURE"));
/// assert!(body.contains("x_exp_date=04%2F2028"));
/// ```
pub fn encode_transaction(
    auth: &MerchantAuthentication,
    transaction: &TransactionRequest,
) -> Result<String> {
    debug!(
        capture_mode = transaction.capture_mode.wire_token(),
        "encoding flat transaction request"
    );

    let mut body = form_urlencoded::Serializer::new(String::new());

    body.append_pair("x_login", &auth.login);
    body.append_pair("x_tran_key", &auth.key);
    body.append_pair("x_type", transaction.capture_mode.wire_token());
    body.append_pair("x_version", API_VERSION);
    body.append_pair("x_delim_char", &REPLY_DELIMITER.to_string());
    body.append_pair("x_delim_data", "TRUE");
    body.append_pair("x_relay_response", "FALSE");

    if let Some(amount) = &transaction.amount {
        body.append_pair("x_amount", amount);
    }

    append_payment(&mut body, transaction)?;

    if let Some(billing) = &transaction.billing {
        append_address(&mut body, billing, false);
    }
    if let Some(shipping) = &transaction.shipping {
        append_address(&mut body, shipping, true);
    }

    append_optional_fields(&mut body, transaction);

    let mut encoded = body.finish();
    append_repeating_groups(&mut encoded, transaction);

    Ok(encoded)
}

fn append_payment(
    body: &mut form_urlencoded::Serializer<'_, String>,
    transaction: &TransactionRequest,
) -> Result<()> {
    let payment = transaction
        .payment
        .as_ref()
        .ok_or(GatewayError::MissingField("payment"))?;

    match payment {
        PaymentInstrument::Card(card) => {
            body.append_pair("x_method", "CC");
            body.append_pair("x_card_num", &card.number);
            body.append_pair("x_exp_date", &card.expiration.format("%m/%Y").to_string());
            if let Some(code) = &card.verification_code {
                body.append_pair("x_card_code", code);
            }
        }
        PaymentInstrument::Bank(bank) => {
            body.append_pair("x_method", "ECHECK");
            body.append_pair("x_bank_aba_code", &bank.routing_number);
            body.append_pair("x_bank_acct_num", &bank.account_number);
            body.append_pair("x_bank_acct_name", &bank.holder_name);
            if let Some(name) = &bank.bank_name {
                body.append_pair("x_bank_name", name);
            }
            if let Some(account_type) = &bank.account_type {
                body.append_pair("x_bank_acct_type", account_type.wire_token());
            }
            if let Some(echeck_type) = &bank.echeck_type {
                body.append_pair("x_echeck_type", echeck_type.wire_token());
            }
        }
    }

    Ok(())
}

// Billing keys are x_first_name..x_fax; shipping reuses the same tail
// behind the x_ship_to_ prefix.
fn append_address(
    body: &mut form_urlencoded::Serializer<'_, String>,
    address: &Address,
    shipping: bool,
) {
    let prefix = if shipping { "x_ship_to_" } else { "x_" };
    let mut pair = |name: &str, value: &Option<String>| {
        if let Some(value) = value {
            body.append_pair(&format!("{prefix}{name}"), value);
        }
    };

    pair("first_name", &address.first_name);
    pair("last_name", &address.last_name);
    pair("company", &address.company);
    pair("address", &address.street);
    pair("city", &address.city);
    pair("state", &address.region);
    pair("zip", &address.postal_code);
    pair("country", &address.country);
    pair("phone", &address.phone);
    pair("fax", &address.fax);
}

fn append_optional_fields(
    body: &mut form_urlencoded::Serializer<'_, String>,
    transaction: &TransactionRequest,
) {
    if let Some(customer_id) = &transaction.customer_id {
        body.append_pair("x_cust_id", customer_id);
    }
    if let Some(customer_ip) = &transaction.customer_ip {
        body.append_pair("x_customer_ip", customer_ip);
    }
    if let Some(email_customer) = transaction.email_customer {
        body.append_pair("x_email_customer", bool_token(email_customer));
    }
    if let Some(email) = &transaction.email {
        body.append_pair("x_email", email);
    }
    if let Some(description) = &transaction.description {
        body.append_pair("x_description", description);
    }
    if let Some(merchant_email) = &transaction.merchant_email {
        body.append_pair("x_merchant_email", merchant_email);
    }
    if let Some(allow_partial_auth) = transaction.allow_partial_auth {
        body.append_pair("x_allow_partial_auth", bool_token(allow_partial_auth));
    }
    if let Some(auth_code) = &transaction.auth_code {
        body.append_pair("x_auth_code", auth_code);
    }
    if let Some(indicator) = &transaction.authentication_indicator {
        body.append_pair("x_authentication_indicator", indicator);
    }
    if let Some(value) = &transaction.cardholder_authentication_value {
        body.append_pair("x_cardholder_authentication_value", value);
    }
    if let Some(window) = transaction.duplicate_window {
        body.append_pair("x_duplicate_window", &window.to_string());
    }
    if let Some(encap) = transaction.encapsulation_char {
        body.append_pair("x_encap_char", &encap.to_string());
    }
    if let Some(footer) = &transaction.footer_email_receipt {
        body.append_pair("x_footer_email_receipt", footer);
    }
    if let Some(header) = &transaction.header_email_receipt {
        body.append_pair("x_header_email_receipt", header);
    }
    if let Some(invoice) = &transaction.invoice {
        body.append_pair("x_invoice_num", invoice);
    }
    if let Some(purchase_order) = &transaction.purchase_order {
        body.append_pair("x_po_num", purchase_order);
    }
    if let Some(split_tender_id) = &transaction.split_tender_id {
        body.append_pair("x_split_tender_id", split_tender_id);
    }
    if let Some(tax_exempt) = transaction.tax_exempt {
        body.append_pair("x_tax_exempt", bool_token(tax_exempt));
    }
    if let Some(recurring) = transaction.recurring_billing {
        body.append_pair("x_recurring_billing", bool_token(recurring));
    }
    if let Some(test_request) = transaction.test_request {
        body.append_pair("x_test_request", bool_token(test_request));
    }
    if let Some(transaction_id) = &transaction.transaction_id {
        body.append_pair("x_trans_id", transaction_id);
    }
}

// Repeating elements share one key, which a flat map cannot express, so
// they go after the primary body in caller order.
fn append_repeating_groups(encoded: &mut String, transaction: &TransactionRequest) {
    for item in &transaction.line_items {
        let segment = [
            encode_component(&item.id),
            encode_component(&item.name),
            encode_component(&item.description),
            item.quantity.to_string(),
            encode_component(&item.unit_price),
            bool_token(item.taxable).to_string(),
        ]
        .join(GROUP_DELIMITER);

        encoded.push_str("&x_line_items=");
        encoded.push_str(&segment);
    }

    let mut singleton = |key: &str, item: &Option<crate::types::ChargeItem>| {
        if let Some(item) = item {
            let segment = [
                encode_component(&item.name),
                encode_component(&item.description),
                encode_component(&item.amount),
            ]
            .join(GROUP_DELIMITER);

            encoded.push_str("&x_");
            encoded.push_str(key);
            encoded.push('=');
            encoded.push_str(&segment);
        }
    };

    singleton("duty", &transaction.duty);
    singleton("tax", &transaction.tax);
    singleton("freight", &transaction.freight);
}

/// Builds the legacy flat-format passthrough string reused by the markup
/// encoder's `extraOptions` block.
///
/// The fixed protocol keys are always present; descriptive fields join
/// only when set. Values are carried verbatim because the markup encoder
/// wraps the whole string in a single escaped text node.
pub fn passthrough_options(transaction: &TransactionRequest) -> String {
    let mut options: Vec<String> = vec![
        format!("x_version={API_VERSION}"),
        format!("x_delim_char={REPLY_DELIMITER}"),
        "x_delim_data=TRUE".to_string(),
        "x_relay_response=FALSE".to_string(),
    ];

    let mut push = |key: &str, value: Option<&str>| {
        if let Some(value) = value {
            options.push(format!("{key}={value}"));
        }
    };

    push("x_cust_id", transaction.customer_id.as_deref());
    push("x_customer_ip", transaction.customer_ip.as_deref());
    push(
        "x_email_customer",
        transaction.email_customer.map(bool_token),
    );
    push("x_email", transaction.email.as_deref());
    push("x_description", transaction.description.as_deref());
    push("x_merchant_email", transaction.merchant_email.as_deref());
    push(
        "x_allow_partial_auth",
        transaction.allow_partial_auth.map(bool_token),
    );
    push("x_auth_code", transaction.auth_code.as_deref());
    push(
        "x_authentication_indicator",
        transaction.authentication_indicator.as_deref(),
    );
    push(
        "x_cardholder_authentication_value",
        transaction.cardholder_authentication_value.as_deref(),
    );
    let window = transaction.duplicate_window.map(|w| w.to_string());
    push("x_duplicate_window", window.as_deref());
    let encap = transaction.encapsulation_char.map(|c| c.to_string());
    push("x_encap_char", encap.as_deref());
    push(
        "x_footer_email_receipt",
        transaction.footer_email_receipt.as_deref(),
    );
    push(
        "x_header_email_receipt",
        transaction.header_email_receipt.as_deref(),
    );

    options.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BankAccount, BankAccountType, Card, ChargeItem, LineItem};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn auth() -> MerchantAuthentication {
        MerchantAuthentication::new("auth_login", "auth_key")
    }

    fn card() -> PaymentInstrument {
        PaymentInstrument::Card(Card {
            number: "4111111111111111".to_string(),
            expiration: NaiveDate::from_ymd_opt(2028, 4, 1).unwrap(),
            verification_code: Some("123".to_string()),
            brand: None,
        })
    }

    fn parse_pairs(body: &str) -> HashMap<String, String> {
        // Reference parser for the primary section only; the repeating
        // suffix is asserted on the raw string.
        let primary = body.split("&x_line_items=").next().unwrap();
        form_urlencoded::parse(primary.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn test_required_keys_always_emitted() {
        let request = TransactionRequest {
            amount: Some("12.50".to_string()),
            payment: Some(card()),
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();
        let pairs = parse_pairs(&body);

        assert_eq!(pairs["x_login"], "auth_login");
        assert_eq!(pairs["x_tran_key"], "auth_key");
        assert_eq!(pairs["x_type"], "AUTH_CAPTURE");
        assert_eq!(pairs["x_version"], "3.1");
        assert_eq!(pairs["x_method"], "CC");
        assert_eq!(pairs["x_delim_char"], "|");
        assert_eq!(pairs["x_delim_data"], "TRUE");
        assert_eq!(pairs["x_relay_response"], "FALSE");
        assert_eq!(pairs["x_amount"], "12.50");
        assert_eq!(pairs["x_card_num"], "4111111111111111");
        assert_eq!(pairs["x_exp_date"], "04/2028");
        assert_eq!(pairs["x_card_code"], "123");
    }

    #[test]
    fn test_optional_fields_are_omitted_not_empty() {
        let request = TransactionRequest {
            amount: Some("12.50".to_string()),
            payment: Some(card()),
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();
        let pairs = parse_pairs(&body);

        assert!(!pairs.contains_key("x_description"));
        assert!(!pairs.contains_key("x_invoice_num"));
        assert!(!pairs.contains_key("x_first_name"));
        assert!(!body.contains("x_description="));
    }

    #[test]
    fn test_missing_payment_is_an_encode_error() {
        let request = TransactionRequest {
            amount: Some("12.50".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            encode_transaction(&auth(), &request),
            Err(GatewayError::MissingField("payment"))
        ));
    }

    #[test]
    fn test_bank_instrument_emits_echeck_fields() {
        let request = TransactionRequest {
            amount: Some("12.50".to_string()),
            payment: Some(PaymentInstrument::Bank(BankAccount {
                account_number: "829330184383".to_string(),
                routing_number: "122400724".to_string(),
                holder_name: "Richard M Branson".to_string(),
                bank_name: Some("Bank of America".to_string()),
                account_type: Some(BankAccountType::Checking),
                echeck_type: None,
            })),
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();
        let pairs = parse_pairs(&body);

        assert_eq!(pairs["x_method"], "ECHECK");
        assert_eq!(pairs["x_bank_aba_code"], "122400724");
        assert_eq!(pairs["x_bank_acct_num"], "829330184383");
        assert_eq!(pairs["x_bank_acct_name"], "Richard M Branson");
        assert_eq!(pairs["x_bank_acct_type"], "checking");
        assert!(!pairs.contains_key("x_card_num"));
        assert!(!pairs.contains_key("x_echeck_type"));
    }

    #[test]
    fn test_addresses_use_prefixed_vocabulary() {
        let billing = Address {
            first_name: Some("Richard".to_string()),
            last_name: Some("Branson".to_string()),
            street: Some("8 Navigators Way".to_string()),
            city: Some("Podunk".to_string()),
            region: Some("California".to_string()),
            postal_code: Some("92009".to_string()),
            ..Default::default()
        };
        let shipping = Address {
            first_name: Some("Holly".to_string()),
            ..Default::default()
        };
        let request = TransactionRequest {
            amount: Some("12.50".to_string()),
            payment: Some(card()),
            billing: Some(billing),
            shipping: Some(shipping),
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();
        let pairs = parse_pairs(&body);

        assert_eq!(pairs["x_first_name"], "Richard");
        assert_eq!(pairs["x_address"], "8 Navigators Way");
        assert_eq!(pairs["x_state"], "California");
        assert_eq!(pairs["x_zip"], "92009");
        assert_eq!(pairs["x_ship_to_first_name"], "Holly");
        assert!(!pairs.contains_key("x_ship_to_last_name"));
    }

    #[test]
    fn test_line_items_appended_in_caller_order() {
        let request = TransactionRequest {
            amount: Some("25.00".to_string()),
            payment: Some(card()),
            line_items: vec![
                LineItem {
                    id: "item1".to_string(),
                    name: "golf balls".to_string(),
                    description: "a dozen".to_string(),
                    quantity: 2,
                    unit_price: "18.95".to_string(),
                    taxable: true,
                },
                LineItem {
                    id: "item2".to_string(),
                    name: "tees".to_string(),
                    description: "wooden".to_string(),
                    quantity: 1,
                    unit_price: "6.05".to_string(),
                    taxable: false,
                },
            ],
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();

        // Sub-fields are percent-encoded individually but the inner
        // delimiter itself is literal.
        assert!(body.contains("&x_line_items=item1<|>golf+balls<|>a+dozen<|>2<|>18.95<|>TRUE"));
        assert!(body.contains("&x_line_items=item2<|>tees<|>wooden<|>1<|>6.05<|>FALSE"));
        let pos1 = body.find("item1").unwrap();
        let pos2 = body.find("item2").unwrap();
        assert!(pos1 < pos2);
    }

    #[test]
    fn test_charge_singletons() {
        let request = TransactionRequest {
            amount: Some("25.00".to_string()),
            payment: Some(card()),
            tax: Some(ChargeItem {
                name: "sales tax".to_string(),
                description: "CA".to_string(),
                amount: "2.06".to_string(),
            }),
            freight: Some(ChargeItem {
                name: "ground".to_string(),
                description: "5 day".to_string(),
                amount: "4.95".to_string(),
            }),
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();

        assert!(body.contains("&x_tax=sales+tax<|>CA<|>2.06"));
        assert!(body.contains("&x_freight=ground<|>5+day<|>4.95"));
        assert!(!body.contains("&x_duty="));
    }

    #[test]
    fn test_boolean_tokens_are_upper_case() {
        let request = TransactionRequest {
            amount: Some("25.00".to_string()),
            payment: Some(card()),
            tax_exempt: Some(true),
            recurring_billing: Some(false),
            test_request: Some(true),
            ..Default::default()
        };
        let body = encode_transaction(&auth(), &request).unwrap();
        let pairs = parse_pairs(&body);

        assert_eq!(pairs["x_tax_exempt"], "TRUE");
        assert_eq!(pairs["x_recurring_billing"], "FALSE");
        assert_eq!(pairs["x_test_request"], "TRUE");
    }

    #[test]
    fn test_passthrough_options_fixed_and_optional_keys() {
        let options = passthrough_options(&TransactionRequest::default());
        assert_eq!(
            options,
            "x_version=3.1&x_delim_char=|&x_delim_data=TRUE&x_relay_response=FALSE"
        );

        let request = TransactionRequest {
            customer_id: Some("24".to_string()),
            duplicate_window: Some(120),
            ..Default::default()
        };
        let options = passthrough_options(&request);
        assert!(options.contains("x_cust_id=24"));
        assert!(options.contains("x_duplicate_window=120"));
        assert!(!options.contains("x_email="));
    }
}
