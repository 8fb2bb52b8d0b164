use crate::domain::payment::{PaymentStatus, ReturnContext};

/// Builds a [`ReturnContext`] from the query string the external processor
/// appends when redirecting the user back.
///
/// Every key is optional and every value is an untrusted string; unrecognized
/// keys are ignored and parsing never fails. On a duplicated key the first
/// occurrence wins. A leading `?` is tolerated so both a bare query string
/// and the tail of a URL work.
pub fn return_context_from_query(query: &str) -> ReturnContext {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut context = ReturnContext::default();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "payment_id" if context.payment_id.is_none() => {
                context.payment_id = Some(value.into_owned());
            }
            "status" if context.status.is_none() => {
                context.status = Some(PaymentStatus::parse(&value));
            }
            "merchant_order_id" if context.merchant_order_id.is_none() => {
                context.merchant_order_id = Some(value.into_owned());
            }
            "preference_id" if context.preference_id.is_none() => {
                context.preference_id = Some(value.into_owned());
            }
            "external_reference" if context.external_reference.is_none() => {
                context.external_reference = Some(value.into_owned());
            }
            _ => {}
        }
    }

    context
}
