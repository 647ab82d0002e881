//! Markup-tree request encoder.
//!
//! Builds the XML documents used by the subscription and profile
//! operations. The root element name is the wire-format root token chosen
//! by the variant registry; an authentication block is always the first
//! child. Absent optional fields produce no element at all, never an
//! empty element.

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

use crate::encode::flat::passthrough_options;
use crate::errors::{GatewayError, Result};
use crate::types::{
    Address, BillingProfile, CaptureMode, MerchantAuthentication, PaymentInstrument,
    ProfileRequest, SubscriptionOrder, SubscriptionRequest, TransactionRequest,
};

/// Namespace declaration carried on every request root element.
pub const XML_NAMESPACE: &str = "AnetApi/xml/v1/schema/AnetApiSchema.xsd";

type Sink = Writer<Vec<u8>>;

fn emit(writer: &mut Sink, event: Event) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| GatewayError::Encode(e.to_string()))
}

fn open(writer: &mut Sink, name: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn close(writer: &mut Sink, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn text_element(writer: &mut Sink, name: &str, value: &str) -> Result<()> {
    open(writer, name)?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    close(writer, name)
}

fn opt_element(writer: &mut Sink, name: &str, value: &Option<String>) -> Result<()> {
    if let Some(value) = value {
        text_element(writer, name, value)?;
    }
    Ok(())
}

fn xml_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn begin_document(writer: &mut Sink, root: &str, auth: &MerchantAuthentication) -> Result<()> {
    let mut element = BytesStart::new(root);
    element.push_attribute(("xmlns", XML_NAMESPACE));
    emit(writer, Event::Start(element))?;

    open(writer, "merchantAuthentication")?;
    text_element(writer, "name", &auth.login)?;
    text_element(writer, "transactionKey", &auth.key)?;
    close(writer, "merchantAuthentication")
}

fn finish_document(mut writer: Sink, root: &str) -> Result<String> {
    close(&mut writer, root)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| GatewayError::Encode(format!("invalid UTF-8 in document: {e}")))
}

/// Writes the inner fields of an address block.
///
/// Shared by every wrapping context (billTo, shipTo, shipToList, address)
/// so the block shape is identical regardless of caller.
fn write_address_fields(writer: &mut Sink, address: &Address) -> Result<()> {
    opt_element(writer, "firstName", &address.first_name)?;
    opt_element(writer, "lastName", &address.last_name)?;
    opt_element(writer, "company", &address.company)?;
    opt_element(writer, "address", &address.street)?;
    opt_element(writer, "city", &address.city)?;
    opt_element(writer, "state", &address.region)?;
    opt_element(writer, "zip", &address.postal_code)?;
    opt_element(writer, "country", &address.country)?;
    opt_element(writer, "phoneNumber", &address.phone)?;
    opt_element(writer, "faxNumber", &address.fax)
}

fn write_address(writer: &mut Sink, tag: &str, address: &Address) -> Result<()> {
    open(writer, tag)?;
    write_address_fields(writer, address)?;
    close(writer, tag)
}

/// Writes a payment block, branching on the active instrument variant.
///
/// The two branches emit disjoint child-element sets; both nest under a
/// single `payment` wrapper.
fn write_payment(writer: &mut Sink, payment: &PaymentInstrument) -> Result<()> {
    open(writer, "payment")?;
    match payment {
        PaymentInstrument::Card(card) => {
            open(writer, "creditCard")?;
            text_element(writer, "cardNumber", &card.number)?;
            text_element(
                writer,
                "expirationDate",
                &card.expiration.format("%Y-%m").to_string(),
            )?;
            opt_element(writer, "cardCode", &card.verification_code)?;
            close(writer, "creditCard")?;
        }
        PaymentInstrument::Bank(bank) => {
            open(writer, "bankAccount")?;
            if let Some(account_type) = &bank.account_type {
                text_element(writer, "accountType", account_type.wire_token())?;
            }
            text_element(writer, "routingNumber", &bank.routing_number)?;
            text_element(writer, "accountNumber", &bank.account_number)?;
            text_element(writer, "nameOnAccount", &bank.holder_name)?;
            if let Some(echeck_type) = &bank.echeck_type {
                text_element(writer, "echeckType", echeck_type.wire_token())?;
            }
            opt_element(writer, "bankName", &bank.bank_name)?;
            close(writer, "bankAccount")?;
        }
    }
    close(writer, "payment")
}

/// Encodes a subscription request into a markup document.
///
/// `root` is the root token chosen by the variant registry for this
/// operation. Status and cancel bodies carry the subscription id only.
pub fn encode_subscription(
    auth: &MerchantAuthentication,
    subscription: &SubscriptionRequest,
    root: &str,
) -> Result<String> {
    debug!(root, "encoding subscription request");

    let mut writer = Writer::new(Vec::new());
    begin_document(&mut writer, root, auth)?;

    match subscription {
        SubscriptionRequest::Create(order) => {
            opt_element(&mut writer, "refId", &order.ref_id)?;
            write_subscription_order(&mut writer, order)?;
        }
        SubscriptionRequest::Update { id, order } => {
            opt_element(&mut writer, "refId", &order.ref_id)?;
            text_element(&mut writer, "subscriptionId", id)?;
            write_subscription_order(&mut writer, order)?;
        }
        SubscriptionRequest::Status { id, ref_id }
        | SubscriptionRequest::Cancel { id, ref_id } => {
            opt_element(&mut writer, "refId", ref_id)?;
            text_element(&mut writer, "subscriptionId", id)?;
        }
    }

    finish_document(writer, root)
}

fn write_subscription_order(writer: &mut Sink, order: &SubscriptionOrder) -> Result<()> {
    open(writer, "subscription")?;

    opt_element(writer, "name", &order.name)?;

    if let Some(schedule) = &order.schedule {
        open(writer, "paymentSchedule")?;
        open(writer, "interval")?;
        text_element(writer, "length", &schedule.interval_length.to_string())?;
        text_element(writer, "unit", schedule.interval_unit.wire_token())?;
        close(writer, "interval")?;
        text_element(
            writer,
            "startDate",
            &schedule.start.format("%Y-%m-%d").to_string(),
        )?;
        text_element(
            writer,
            "totalOccurrences",
            &schedule.total_cycles.to_string(),
        )?;
        if let Some(trial_cycles) = schedule.trial_cycles {
            text_element(writer, "trialOccurrences", &trial_cycles.to_string())?;
        }
        close(writer, "paymentSchedule")?;
    }

    opt_element(writer, "amount", &order.amount)?;
    opt_element(writer, "trialAmount", &order.trial_amount)?;

    if let Some(payment) = &order.payment {
        write_payment(writer, payment)?;
    }

    // Order and customer wrappers appear only when one of their children
    // is present.
    if order.invoice.is_some() || order.description.is_some() {
        open(writer, "order")?;
        opt_element(writer, "invoiceNumber", &order.invoice)?;
        opt_element(writer, "description", &order.description)?;
        close(writer, "order")?;
    }

    let billing_phone = order.billing.as_ref().and_then(|b| b.phone.clone());
    let billing_fax = order.billing.as_ref().and_then(|b| b.fax.clone());
    if order.customer_id.is_some()
        || order.email.is_some()
        || billing_phone.is_some()
        || billing_fax.is_some()
    {
        open(writer, "customer")?;
        opt_element(writer, "id", &order.customer_id)?;
        opt_element(writer, "email", &order.email)?;
        opt_element(writer, "phoneNumber", &billing_phone)?;
        opt_element(writer, "faxNumber", &billing_fax)?;
        close(writer, "customer")?;
    }

    if let Some(billing) = &order.billing {
        write_address(writer, "billTo", billing)?;
    }
    if let Some(shipping) = &order.shipping {
        write_address(writer, "shipTo", shipping)?;
    }

    close(writer, "subscription")
}

/// Encodes a profile request into a markup document.
///
/// `root` is the root token chosen by the variant registry for this
/// operation.
pub fn encode_profile(
    auth: &MerchantAuthentication,
    profile: &ProfileRequest,
    root: &str,
) -> Result<String> {
    debug!(root, "encoding profile request");

    let mut writer = Writer::new(Vec::new());
    begin_document(&mut writer, root, auth)?;
    opt_element(&mut writer, "refId", &profile_ref_id(profile))?;

    match profile {
        ProfileRequest::Create {
            customer_id,
            description,
            email,
            billing,
            shipping,
            validation,
            ..
        } => {
            open(&mut writer, "profile")?;
            opt_element(&mut writer, "merchantCustomerId", customer_id)?;
            opt_element(&mut writer, "description", description)?;
            opt_element(&mut writer, "email", email)?;
            for sub_profile in billing {
                write_billing_profile(&mut writer, "paymentProfiles", sub_profile, None)?;
            }
            for address in shipping {
                write_address(&mut writer, "shipToList", address)?;
            }
            close(&mut writer, "profile")?;
            if let Some(validation) = validation {
                text_element(&mut writer, "validationMode", validation.wire_token())?;
            }
        }

        ProfileRequest::CreateBilling {
            profile_id,
            billing,
            ..
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            write_billing_profile(&mut writer, "paymentProfile", billing, None)?;
        }

        ProfileRequest::CreateShipping {
            profile_id,
            shipping,
            ..
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            write_address(&mut writer, "address", shipping)?;
        }

        ProfileRequest::CreateTransaction {
            profile_id,
            billing_id,
            shipping_id,
            transaction,
            ..
        } => {
            open(&mut writer, "transaction")?;
            let tag = transaction_wrapper(transaction.capture_mode);
            open(&mut writer, tag)?;
            write_profile_transaction(
                &mut writer,
                transaction,
                *profile_id,
                *billing_id,
                *shipping_id,
            )?;
            close(&mut writer, tag)?;
            close(&mut writer, "transaction")?;

            // Legacy flat-format options ride along as one escaped block.
            emit(
                &mut writer,
                Event::Start(BytesStart::new("extraOptions")),
            )?;
            emit(
                &mut writer,
                Event::CData(BytesCData::new(passthrough_options(transaction))),
            )?;
            close(&mut writer, "extraOptions")?;
        }

        ProfileRequest::Update {
            profile_id,
            customer_id,
            description,
            email,
            ..
        } => {
            open(&mut writer, "profile")?;
            opt_element(&mut writer, "merchantCustomerId", customer_id)?;
            opt_element(&mut writer, "description", description)?;
            opt_element(&mut writer, "email", email)?;
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            close(&mut writer, "profile")?;
        }

        ProfileRequest::UpdateBilling {
            profile_id,
            billing_id,
            billing,
            validation,
            ..
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            write_billing_profile(&mut writer, "paymentProfile", billing, Some(*billing_id))?;
            if let Some(validation) = validation {
                text_element(&mut writer, "validationMode", validation.wire_token())?;
            }
        }

        ProfileRequest::UpdateShipping {
            profile_id,
            shipping_id,
            shipping,
            ..
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            open(&mut writer, "address")?;
            write_address_fields(&mut writer, shipping)?;
            text_element(&mut writer, "customerAddressId", &shipping_id.to_string())?;
            close(&mut writer, "address")?;
        }

        ProfileRequest::UpdateSplitTender {
            split_tender_id,
            status,
        } => {
            text_element(&mut writer, "splitTenderId", &split_tender_id.to_string())?;
            text_element(&mut writer, "splitTenderStatus", status.wire_token())?;
        }

        ProfileRequest::RetrieveAll => {}

        ProfileRequest::Retrieve { profile_id } | ProfileRequest::Delete { profile_id, .. } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
        }

        ProfileRequest::RetrieveBilling {
            profile_id,
            billing_id,
        }
        | ProfileRequest::DeleteBilling {
            profile_id,
            billing_id,
            ..
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            text_element(
                &mut writer,
                "customerPaymentProfileId",
                &billing_id.to_string(),
            )?;
        }

        ProfileRequest::RetrieveShipping {
            profile_id,
            shipping_id,
        }
        | ProfileRequest::DeleteShipping {
            profile_id,
            shipping_id,
            ..
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            text_element(&mut writer, "customerAddressId", &shipping_id.to_string())?;
        }

        ProfileRequest::Validate {
            profile_id,
            billing_id,
            shipping_id,
            card_code,
            validation,
        } => {
            text_element(&mut writer, "customerProfileId", &profile_id.to_string())?;
            text_element(
                &mut writer,
                "customerPaymentProfileId",
                &billing_id.to_string(),
            )?;
            if let Some(shipping_id) = shipping_id {
                text_element(
                    &mut writer,
                    "customerShippingAddressId",
                    &shipping_id.to_string(),
                )?;
            }
            opt_element(&mut writer, "cardCode", card_code)?;
            text_element(&mut writer, "validationMode", validation.wire_token())?;
        }
    }

    finish_document(writer, root)
}

fn profile_ref_id(profile: &ProfileRequest) -> Option<String> {
    match profile {
        ProfileRequest::Create { ref_id, .. }
        | ProfileRequest::CreateBilling { ref_id, .. }
        | ProfileRequest::CreateShipping { ref_id, .. }
        | ProfileRequest::CreateTransaction { ref_id, .. }
        | ProfileRequest::Update { ref_id, .. }
        | ProfileRequest::UpdateBilling { ref_id, .. }
        | ProfileRequest::UpdateShipping { ref_id, .. }
        | ProfileRequest::Delete { ref_id, .. }
        | ProfileRequest::DeleteBilling { ref_id, .. }
        | ProfileRequest::DeleteShipping { ref_id, .. } => ref_id.clone(),
        _ => None,
    }
}

fn write_billing_profile(
    writer: &mut Sink,
    tag: &str,
    billing: &BillingProfile,
    billing_id: Option<u64>,
) -> Result<()> {
    open(writer, tag)?;
    if let Some(entity_type) = &billing.entity_type {
        text_element(writer, "customerType", entity_type.wire_token())?;
    }
    if let Some(address) = &billing.address {
        write_address(writer, "billTo", address)?;
    }
    let payment = billing
        .payment
        .as_ref()
        .ok_or(GatewayError::MissingField("payment"))?;
    write_payment(writer, payment)?;
    if let Some(billing_id) = billing_id {
        text_element(writer, "customerPaymentProfileId", &billing_id.to_string())?;
    }
    close(writer, tag)
}

/// Maps each capture mode to its dedicated wrapping element name.
fn transaction_wrapper(mode: CaptureMode) -> &'static str {
    match mode {
        CaptureMode::AuthorizeCapture => "profileTransAuthCapture",
        CaptureMode::AuthorizeOnly => "profileTransAuthOnly",
        CaptureMode::CaptureOnly => "profileTransCaptureOnly",
        CaptureMode::Credit => "profileTransRefund",
        CaptureMode::PriorAuthorizationCapture => "profileTransPriorAuthCapture",
        CaptureMode::Void => "profileTransVoid",
    }
}

// The transaction body is structurally identical across all six capture
// modes; only the wrapping element differs.
fn write_profile_transaction(
    writer: &mut Sink,
    transaction: &TransactionRequest,
    profile_id: u64,
    billing_id: u64,
    shipping_id: Option<u64>,
) -> Result<()> {
    opt_element(writer, "amount", &transaction.amount)?;

    let mut charge = |writer: &mut Sink, tag: &str, item: &Option<crate::types::ChargeItem>| {
        if let Some(item) = item {
            open(writer, tag)?;
            text_element(writer, "amount", &item.amount)?;
            text_element(writer, "name", &item.name)?;
            text_element(writer, "description", &item.description)?;
            close(writer, tag)?;
        }
        Ok::<(), GatewayError>(())
    };

    charge(writer, "tax", &transaction.tax)?;
    // The gateway calls the freight charge "shipping" in this context.
    charge(writer, "shipping", &transaction.freight)?;
    charge(writer, "duty", &transaction.duty)?;

    for item in &transaction.line_items {
        open(writer, "lineItems")?;
        text_element(writer, "itemId", &item.id)?;
        text_element(writer, "name", &item.name)?;
        text_element(writer, "description", &item.description)?;
        text_element(writer, "quantity", &item.quantity.to_string())?;
        text_element(writer, "unitPrice", &item.unit_price)?;
        text_element(writer, "taxable", xml_bool(item.taxable))?;
        close(writer, "lineItems")?;
    }

    text_element(writer, "customerProfileId", &profile_id.to_string())?;
    text_element(writer, "customerPaymentProfileId", &billing_id.to_string())?;
    if let Some(shipping_id) = shipping_id {
        text_element(
            writer,
            "customerShippingAddressId",
            &shipping_id.to_string(),
        )?;
    }
    opt_element(writer, "transId", &transaction.transaction_id)?;

    if transaction.invoice.is_some()
        || transaction.description.is_some()
        || transaction.purchase_order.is_some()
    {
        open(writer, "order")?;
        opt_element(writer, "invoiceNumber", &transaction.invoice)?;
        opt_element(writer, "description", &transaction.description)?;
        opt_element(writer, "purchaseOrderNumber", &transaction.purchase_order)?;
        close(writer, "order")?;
    }

    if let Some(tax_exempt) = transaction.tax_exempt {
        text_element(writer, "taxExempt", xml_bool(tax_exempt))?;
    }
    if let Some(recurring) = transaction.recurring_billing {
        text_element(writer, "recurringBilling", xml_bool(recurring))?;
    }
    opt_element(writer, "splitTenderId", &transaction.split_tender_id)?;
    opt_element(writer, "cardCode", &transaction.card_code)?;

    Ok(())
}
