//! Request and response bodies for the backend endpoints.

use serde::{Deserialize, Serialize};

/// `POST /basicTokenize`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicTokenizeRequest<'a, T: ?Sized, C: ?Sized> {
    pub token: &'a T,
    pub charge_data: &'a C,
    pub public_key: &'a str,
}

/// `POST /recurringTokenize`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTokenizeRequest<'a, P: ?Sized, C: ?Sized, S: ?Sized> {
    pub payment_method: &'a P,
    pub customer_data: &'a C,
    pub subscription_data: &'a S,
    pub public_key: &'a str,
}

/// `POST /createCheckout`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest<'a, D: ?Sized> {
    pub checkout_data: &'a D,
    pub public_key: &'a str,
}

/// `POST /validateCheckout`. Note `session_id` stays snake_case on the wire.
#[derive(Debug, Serialize)]
pub struct ValidateCheckoutRequest<'a> {
    pub session_id: &'a str,
    #[serde(rename = "publicKey")]
    pub public_key: &'a str,
}

/// `GET /publicKey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyResponse {
    pub public_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_tokenize_field_names() {
        let token = json!({"id": "tok_1"});
        let charge = json!({"amount": 500});
        let body = BasicTokenizeRequest {
            token: &token,
            charge_data: &charge,
            public_key: "pk_test_1",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"token": {"id": "tok_1"}, "chargeData": {"amount": 500}, "publicKey": "pk_test_1"})
        );
    }

    #[test]
    fn test_recurring_field_names() {
        let pm = json!({"id": "pm_1"});
        let customer = json!({"email": "a@b.c"});
        let sub = json!({"plan": "gold"});
        let body = RecurringTokenizeRequest {
            payment_method: &pm,
            customer_data: &customer,
            subscription_data: &sub,
            public_key: "pk_test_1",
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["paymentMethod"]["id"], "pm_1");
        assert_eq!(v["customerData"]["email"], "a@b.c");
        assert_eq!(v["subscriptionData"]["plan"], "gold");
        assert_eq!(v["publicKey"], "pk_test_1");
    }

    #[test]
    fn test_validate_checkout_keeps_snake_case_session_id() {
        let body = ValidateCheckoutRequest {
            session_id: "abc123",
            public_key: "pk_test_1",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"session_id": "abc123", "publicKey": "pk_test_1"})
        );
    }

    #[test]
    fn test_create_checkout_field_names() {
        let data = json!({"items": [{"sku": "sku_1", "quantity": 1}]});
        let body = CreateCheckoutRequest {
            checkout_data: &data,
            public_key: "pk_test_1",
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["checkoutData"]["items"][0]["sku"], "sku_1");
        assert_eq!(v["publicKey"], "pk_test_1");
    }
}
