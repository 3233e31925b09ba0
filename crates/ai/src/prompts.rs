//! Prompt builders. Each prompt asks the model to answer with a single JSON
//! object so the caller can recover it with `atelier_core::llm_json`.

/// System prompt for comment proposals.
pub const COMMENTS_SYSTEM_PROMPT: &str = "You are the social media manager of a fashion brand. \
You write short, warm, on-brand replies. You always answer with valid JSON only.";

/// Inputs for the market-trends prompt.
#[derive(Debug, Clone, Default)]
pub struct MarketTrendsQuery {
    pub season: Option<String>,
    pub location: Option<String>,
    pub categories: Vec<String>,
}

/// Inputs for the comment-proposal prompt.
#[derive(Debug, Clone)]
pub struct CommentRequest {
    pub post_text: String,
    pub brand_voice: Option<String>,
    pub count: u8,
}

/// Build the Gemini prompt for a market-trend briefing.
pub fn market_trends(query: &MarketTrendsQuery) -> String {
    let season = query.season.as_deref().unwrap_or("the upcoming season");
    let location = query.location.as_deref().unwrap_or("the global market");
    let categories = if query.categories.is_empty() {
        "all womenswear and menswear categories".to_string()
    } else {
        query.categories.join(", ")
    };

    format!(
        "Act as a fashion market analyst. Describe the key fashion market trends for {season} \
in {location}, focusing on {categories}.\n\
Respond ONLY with a JSON object of this shape:\n\
{{\n  \"trends\": [{{\"name\": string, \"description\": string, \"relevance\": \"high\"|\"medium\"|\"low\"}}],\n  \
\"keywords\": [string],\n  \"colors\": [{{\"name\": string, \"hex\": string}}],\n  \"summary\": string\n}}\n\
Return between 3 and 8 trends. Do not include any text outside the JSON."
    )
}

/// Build the Claude prompt proposing replies to a social post.
pub fn propose_comments(request: &CommentRequest) -> String {
    let voice = request
        .brand_voice
        .as_deref()
        .unwrap_or("friendly, confident and concise");
    format!(
        "Propose {count} different replies the brand could post under this social media post.\n\
Brand voice: {voice}.\n\
Post:\n\"\"\"\n{post}\n\"\"\"\n\
Respond ONLY with a JSON object of this shape:\n\
{{\"comments\": [{{\"text\": string, \"tone\": string}}]}}",
        count = request.count,
        post = request.post_text.trim(),
    )
}
