use axum::response::Html;

/// GET /thank_you
pub async fn thank_you_handler() -> Html<&'static str> {
    Html("<h1>Thanks</h1>")
}
