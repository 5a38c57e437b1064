use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub request_locale: String,
    pub locale: String,
    pub schema: String,
    pub creator: String,
    pub editor: String,
    pub status: String,
    pub version: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub behind: bool,
    pub content: Map<String, Value>,
    pub subdocs: Value,
    pub relationships: Value,
    pub channel: String,
    pub resource: String,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub errors: Vec<String>,
    pub links: Vec<String>,
    pub meta: Map<String, Value>,
    pub included: Map<String, Value>,
}

impl<T> Envelope<T> {
    fn data(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
            links: Vec::new(),
            meta: Map::new(),
            included: Map::new(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateDocument {
    pub schema: String,
    #[serde(default)]
    pub content: Map<String, Value>,
}

/// Identity taken from the Lucent request headers.
struct Caller {
    channel: String,
    user: Option<String>,
    locale: String,
}

type Rejection = (StatusCode, Json<Envelope<Value>>);

pub type Db = Arc<RwLock<Vec<Document>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/documents", get(list_documents).post(create_document))
        .route("/api/documents/", get(list_documents).post(create_document))
        .route("/api/channels", get(list_channels))
        .route("/api/channels/", get(list_channels))
        .route("/api/files", get(list_files))
        .route("/api/files/", get(list_files))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock Lucent API listening");
    }
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, message: &str) -> Rejection {
    debug!(%status, message, "rejecting request");
    let mut envelope = Envelope::data(Value::Null);
    envelope.errors.push(message.to_string());
    (status, Json(envelope))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

fn authorize(headers: &HeaderMap) -> Result<Caller, Rejection> {
    let token = header(headers, "authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty());
    if token.is_none() {
        return Err(reject(StatusCode::UNAUTHORIZED, "Unauthenticated."));
    }
    let channel = header(headers, "lucent-channel")
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Missing Lucent-Channel header."))?;

    Ok(Caller {
        channel: channel.to_string(),
        user: header(headers, "lucent-user").map(str::to_string),
        locale: header(headers, "accept-language").unwrap_or("en-US").to_string(),
    })
}

async fn list_documents(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Vec<Document>>>, Rejection> {
    let caller = authorize(&headers)?;
    let docs: Vec<Document> = db
        .read()
        .await
        .iter()
        .filter(|doc| doc.channel == caller.channel)
        .cloned()
        .collect();
    let mut envelope = Envelope::data(docs);
    envelope.meta.insert("total".to_string(), json!(envelope.data.len()));
    Ok(Json(envelope))
}

async fn create_document(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateDocument>,
) -> Result<(StatusCode, Json<Envelope<Document>>), Rejection> {
    let caller = authorize(&headers)?;
    if input.schema.is_empty() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "The schema field is required."));
    }

    let now = Utc::now();
    let author = caller.user.unwrap_or_else(|| "api".to_string());
    let doc = Document {
        id: Uuid::new_v4().to_string(),
        request_locale: caller.locale.clone(),
        locale: caller.locale,
        schema: input.schema,
        creator: author.clone(),
        editor: author,
        status: "draft".to_string(),
        version: 1,
        published_at: None,
        behind: false,
        content: input.content,
        subdocs: json!({}),
        relationships: json!({}),
        channel: caller.channel,
        resource: "documents".to_string(),
        updated_at: now,
        created_at: now,
    };
    db.write().await.push(doc.clone());
    debug!(id = %doc.id, schema = %doc.schema, "created document");
    Ok((StatusCode::CREATED, Json(Envelope::data(doc))))
}

async fn list_channels(headers: HeaderMap) -> Result<Json<Envelope<Vec<Document>>>, Rejection> {
    let caller = authorize(&headers)?;
    let now = Utc::now();
    let mut content = Map::new();
    content.insert("name".to_string(), json!(caller.channel));
    let channel = Document {
        id: caller.channel.clone(),
        request_locale: caller.locale.clone(),
        locale: caller.locale,
        schema: "channels".to_string(),
        creator: String::new(),
        editor: String::new(),
        status: "active".to_string(),
        version: 1,
        published_at: Some(now),
        behind: false,
        content,
        subdocs: Value::Null,
        relationships: Value::Null,
        channel: caller.channel,
        resource: "channels".to_string(),
        updated_at: now,
        created_at: now,
    };
    Ok(Json(Envelope::data(vec![channel])))
}

async fn list_files(headers: HeaderMap) -> Result<Json<Envelope<Vec<Document>>>, Rejection> {
    authorize(&headers)?;
    Ok(Json(Envelope::data(Vec::new())))
}
