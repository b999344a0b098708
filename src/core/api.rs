//! HTTP + WebSocket API for RoiYan
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /api/messages - All messages, oldest first
//! - POST /api/messages - Post a message (tagged on arrival)
//! - DELETE /api/messages - Clear the room
//! - POST /api/classify - Classify text without storing it
//! - GET /api/stats - Aggregate emotion statistics
//! - GET /api/export/chat - Chat log as text
//! - GET /api/export/report - Emotion report as text
//! - POST /api/reflections - Submit a reflection
//! - GET /api/reflections - Recent reflections (`?all=true` for every one)
//! - POST /api/bot/start, /api/bot/stop - Bot participant
//! - WS /ws - Live updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::core::bot::{BotHandle, BotSimulator};
use crate::core::export::{chat_log_filename, chat_log_txt, emotion_report_txt, report_filename};
use crate::core::{EmotionClassifier, MessageStore};
use crate::types::{
    ChatMessage, EmotionResult, EmotionStats, NewMessage, NewReflection, ReflectionData,
    ReflectionSummary, StatsSummary,
};
use crate::{ChatError, BROADCAST_CAPACITY, REFLECTION_RECENT};

/// Server settings resolved from the CLI
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: String,
    /// Start the bot participant with the server
    pub bot: bool,
    pub classifier: EmotionClassifier,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:4000".to_string(),
            bot: false,
            classifier: EmotionClassifier::default(),
        }
    }
}

/// Live update pushed to every connected client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChatEvent {
    NewMessage(ChatMessage),
    ClearMessages,
}

/// App state
pub struct AppState {
    store: RwLock<MessageStore>,
    reflections: RwLock<Vec<ReflectionData>>,
    classifier: EmotionClassifier,
    events: broadcast::Sender<ChatEvent>,
    bot: Mutex<Option<BotHandle>>,
}

impl AppState {
    pub fn new(classifier: EmotionClassifier) -> Arc<Self> {
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        Arc::new(Self {
            store: RwLock::new(MessageStore::new()),
            reflections: RwLock::new(Vec::new()),
            classifier,
            events,
            bot: Mutex::new(None),
        })
    }

    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    /// Receiver for live events
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    /// All messages, oldest first
    pub async fn messages(&self) -> Vec<ChatMessage> {
        let store = self.store.read().await;
        store
            .list()
            .iter()
            .map(|row| ChatMessage::from_row(row, |content| self.classifier.classify(content)))
            .collect()
    }

    /// Current statistics
    pub async fn stats(&self) -> EmotionStats {
        EmotionStats::from_messages(&self.messages().await)
    }

    /// Accept a client message: validate, tag, store, broadcast
    pub async fn ingest(&self, req: NewMessage) -> Result<ChatMessage, ChatError> {
        if req.content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let emotion = match req.annotation() {
            Some(annotation) => annotation,
            None => {
                if req.emotion.is_some() {
                    debug!(user = %req.user_id, "discarding malformed emotion annotation");
                }
                self.classifier.classify(&req.content)
            }
        };

        Ok(self.publish(&req, emotion).await)
    }

    /// Store an already-tagged message and broadcast it
    pub async fn publish(&self, req: &NewMessage, emotion: EmotionResult) -> ChatMessage {
        let row = self.store.write().await.insert(req, emotion);
        let message = ChatMessage::from_row(&row, |content| self.classifier.classify(content));

        info!(
            id = message.id,
            user = %message.user_id,
            emotion = %message.emotion.emotion,
            confidence = message.emotion.confidence,
            "message stored"
        );
        // No receivers is fine
        let _ = self.events.send(ChatEvent::NewMessage(message.clone()));
        message
    }

    /// Validate and keep a reflection
    pub async fn reflect(&self, req: NewReflection) -> Result<ReflectionData, ChatError> {
        let reflection = req.validate(Utc::now())?;
        info!(
            actual = %reflection.actual_emotion,
            accuracy = reflection.perceived_accuracy,
            "reflection stored"
        );
        self.reflections.write().await.push(reflection.clone());
        Ok(reflection)
    }

    /// Reflections in submission order
    pub async fn reflections(&self) -> Vec<ReflectionData> {
        self.reflections.read().await.clone()
    }

    /// Clear the room, reflections included
    pub async fn clear(&self) {
        self.store.write().await.clear();
        self.reflections.write().await.clear();
        info!("messages cleared");
        let _ = self.events.send(ChatEvent::ClearMessages);
    }

    /// Start the bot; no-op when already running
    pub async fn start_bot(self: &Arc<Self>) -> bool {
        let mut bot = self.bot.lock().await;
        if bot.as_ref().map_or(false, BotHandle::is_active) {
            return true;
        }
        let sim = BotSimulator::with_default_user(self.classifier.clone());
        *bot = Some(BotHandle::spawn(sim, Arc::clone(self)));
        true
    }

    /// Stop the bot; no-op when not running
    pub async fn stop_bot(&self) -> bool {
        if let Some(handle) = self.bot.lock().await.take() {
            handle.stop();
        }
        false
    }

    pub async fn bot_active(&self) -> bool {
        self.bot.lock().await.as_ref().map_or(false, BotHandle::is_active)
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub messages: usize,
}

/// Classify request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Clear response
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

/// Bot status response
#[derive(Debug, Serialize)]
pub struct BotStatusResponse {
    pub active: bool,
}

/// Reflection listing filter
#[derive(Debug, Default, Deserialize)]
pub struct ReflectionQuery {
    /// Every reflection instead of the most recent few
    #[serde(default)]
    pub all: bool,
}

/// Reflection listing with its summary against the detected mood
#[derive(Debug, Serialize)]
pub struct ReflectionsResponse {
    pub reflections: Vec<ReflectionData>,
    pub summary: ReflectionSummary,
}

/// Create the API router with fresh state
pub fn create_router(config: &AppConfig) -> Router {
    router_with_state(AppState::new(config.classifier.clone()))
}

/// Create the API router over existing state
pub fn router_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/messages",
            get(list_messages).post(post_message).delete(clear_messages),
        )
        .route("/api/classify", post(classify))
        .route("/api/stats", get(stats))
        .route("/api/export/chat", get(export_chat))
        .route("/api/export/report", get(export_report))
        .route("/api/reflections", get(list_reflections).post(post_reflection))
        .route("/api/bot/start", post(start_bot))
        .route("/api/bot/stop", post(stop_bot))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.store.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        messages: store.len(),
    })
}

async fn list_messages(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessage>> {
    Json(state.messages().await)
}

async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMessage>,
) -> Result<Json<ChatMessage>, ChatError> {
    state.ingest(req).await.map(Json)
}

async fn clear_messages(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    state.clear().await;
    Json(ClearResponse { success: true })
}

async fn classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Json<EmotionResult> {
    Json(state.classifier().classify(&req.text))
}

async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsSummary> {
    Json(state.stats().await.summary())
}

async fn export_chat(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ChatError> {
    let body = chat_log_txt(&state.messages().await)?;
    Ok(text_attachment(chat_log_filename(Utc::now().date_naive()), body))
}

async fn export_report(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ChatError> {
    let messages = state.messages().await;
    let stats = EmotionStats::from_messages(&messages);
    let body = emotion_report_txt(&stats, &messages, &state.reflections().await)?;
    Ok(text_attachment(report_filename(Utc::now().date_naive()), body))
}

async fn post_reflection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewReflection>,
) -> Result<Json<ReflectionData>, ChatError> {
    state.reflect(req).await.map(Json)
}

async fn list_reflections(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReflectionQuery>,
) -> Json<ReflectionsResponse> {
    let mut reflections = state.reflections().await;
    let summary = ReflectionSummary::new(&reflections, state.stats().await.dominant());
    if !query.all {
        let skip = reflections.len().saturating_sub(REFLECTION_RECENT);
        reflections.drain(..skip);
    }
    Json(ReflectionsResponse {
        reflections,
        summary,
    })
}

fn text_attachment(filename: String, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

async fn start_bot(State(state): State<Arc<AppState>>) -> Json<BotStatusResponse> {
    Json(BotStatusResponse {
        active: state.start_bot().await,
    })
}

async fn stop_bot(State(state): State<Arc<AppState>>) -> Json<BotStatusResponse> {
    Json(BotStatusResponse {
        active: state.stop_bot().await,
    })
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward events until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<ChatEvent>) {
    let (mut sender, mut receiver) = socket.split();
    info!("client connected");

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "failed to encode event");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "client lagging, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Incoming frames are ignored; we only watch for close
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = receiver.next().await {
            if matches!(frame, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    info!("client disconnected");
}

/// Run the API server
pub async fn run_server(config: AppConfig) -> Result<(), ChatError> {
    let state = AppState::new(config.classifier.clone());
    if config.bot {
        state.start_bot().await;
    }

    let router = router_with_state(state);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, "RoiYan API running");
    info!("  GET    /health             - Health check");
    info!("  GET    /api/messages       - List messages");
    info!("  POST   /api/messages       - Post message");
    info!("  DELETE /api/messages       - Clear messages");
    info!("  POST   /api/classify       - Classify text");
    info!("  GET    /api/stats          - Emotion statistics");
    info!("  GET    /api/export/chat    - Chat log (txt)");
    info!("  GET    /api/export/report  - Emotion report (txt)");
    info!("  GET    /api/reflections    - Recent reflections");
    info!("  POST   /api/reflections    - Submit reflection");
    info!("  POST   /api/bot/start|stop - Bot participant");
    info!("  WS     /ws                 - Live updates");
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Emotion;

    #[tokio::test]
    async fn test_ingest_classifies_and_broadcasts() {
        let state = AppState::new(EmotionClassifier::default());
        let mut rx = state.subscribe();

        let message = state
            .ingest(NewMessage::plain("u1", "Rina", "aku marah dan sedih"))
            .await
            .unwrap();
        assert_eq!(message.id, 1);
        assert_eq!(message.emotion.emotion, Emotion::Marah);

        match rx.recv().await.unwrap() {
            ChatEvent::NewMessage(pushed) => assert_eq!(pushed, message),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ingest_rejects_blank() {
        let state = AppState::new(EmotionClassifier::default());
        let err = state.ingest(NewMessage::plain("u1", "Rina", "   ")).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert!(state.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_broadcasts() {
        let state = AppState::new(EmotionClassifier::default());
        state.ingest(NewMessage::plain("u1", "Rina", "halo")).await.unwrap();
        let mut rx = state.subscribe();
        state.clear().await;
        assert_eq!(rx.recv().await.unwrap(), ChatEvent::ClearMessages);
        assert!(state.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_reflections_kept_and_cleared_with_messages() {
        let state = AppState::new(EmotionClassifier::default());
        state.ingest(NewMessage::plain("u1", "Rina", "senang")).await.unwrap();

        let err = state.reflect(NewReflection::new("senang", 8, "ok")).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidReflection(_)));
        assert!(state.reflections().await.is_empty());

        let kept = state.reflect(NewReflection::new("senang", 8, "pas banget")).await.unwrap();
        assert_eq!(state.reflections().await, vec![kept]);

        state.clear().await;
        assert!(state.reflections().await.is_empty());
    }

    #[tokio::test]
    async fn test_bot_start_stop() {
        let state = AppState::new(EmotionClassifier::default());
        assert!(!state.bot_active().await);
        assert!(state.start_bot().await);
        assert!(state.bot_active().await);
        assert!(state.start_bot().await);
        assert!(!state.stop_bot().await);
        assert!(!state.bot_active().await);
        assert!(!state.stop_bot().await);
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_string(&ChatEvent::ClearMessages).unwrap();
        assert_eq!(json, r#"{"event":"clear_messages"}"#);
    }
}
