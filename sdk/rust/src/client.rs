use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub product: String,
    pub price: f64,
    pub amount: i64,
    /// Upper-case wire value, e.g. `PENDING`.
    pub status: String,
}

/// A created entity plus the `Location` header the server returned.
#[derive(Debug, Clone)]
pub struct Created<T> {
    pub value: T,
    pub location: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    /// Status code of a non-success response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
        }
    }
}

#[derive(Deserialize)]
struct Message {
    message: String,
}

pub struct CustomerClient {
    client: Client,
    base_url: String,
    admin: Option<(String, String)>,
}

impl CustomerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            admin: None,
        }
    }

    /// Attach Basic credentials used by the admin methods.
    pub fn with_admin(mut self, username: &str, password: &str) -> Self {
        self.admin = Some((username.to_string(), password.to_string()));
        self
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.fetch(self.client.get(self.url("/customers"))).await
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer, ClientError> {
        self.fetch(self.client.get(self.url(&format!("/customers/{id}")))).await
    }

    pub async fn create_customer(&self, name: &str, age: i64) -> Result<Created<Customer>, ClientError> {
        let req = self
            .client
            .post(self.url("/customers"))
            .json(&json!({ "name": name, "age": age }));
        self.create(req).await
    }

    pub async fn list_orders(&self, customer_id: &str) -> Result<Vec<Order>, ClientError> {
        self.fetch(self.client.get(self.url(&format!("/customers/{customer_id}/orders"))))
            .await
    }

    pub async fn get_order(&self, customer_id: &str, order_id: &str) -> Result<Order, ClientError> {
        let path = format!("/customers/{customer_id}/orders/{order_id}");
        self.fetch(self.client.get(self.url(&path))).await
    }

    pub async fn create_order(
        &self,
        customer_id: &str,
        product: &str,
        price: f64,
        amount: i64,
    ) -> Result<Created<Order>, ClientError> {
        let req = self
            .client
            .post(self.url(&format!("/customers/{customer_id}/orders")))
            .json(&json!({ "product": product, "price": price, "amount": amount }));
        self.create(req).await
    }

    /// `GET /admin`, returning the greeting message.
    pub async fn admin_info(&self) -> Result<String, ClientError> {
        let req = self.with_credentials(self.client.get(self.url("/admin")));
        let message: Message = self.fetch(req).await?;
        Ok(message.message)
    }

    /// `GET /admin/status` as raw JSON.
    pub async fn admin_status(&self) -> Result<serde_json::Value, ClientError> {
        let req = self.with_credentials(self.client.get(self.url("/admin/status")));
        self.fetch(req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_credentials(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.admin {
            Some((user, pass)) => req.basic_auth(user, Some(pass)),
            None => req,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = check(req.send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn create<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Created<T>, ClientError> {
        let resp = check(req.send().await?).await?;
        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Created {
            value: resp.json().await?,
            location,
        })
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await?;
    let message = serde_json::from_str::<Message>(&text)
        .map(|m| m.message)
        .unwrap_or(text);
    Err(ClientError::Status { status, message })
}
