use crate::error::ApiError;
use crate::search::render::SearchView;
use crate::search::session::SearchTicket;
use crate::search::strategy::SearchStrategy;
use crate::state::ClientState;

/// GET /search - Run one search with the session's selected preset.
///
/// Returns `None` without touching the network for a blank query.
/// Otherwise returns the view after this response was applied, which is
/// unchanged if a newer search superseded this one meanwhile.
pub async fn run_search(state: &ClientState, query: &str) -> Option<SearchView> {
    let options = state.config.search_options();
    let ticket = state.search.write().begin(query, options)?;
    Some(execute(state, ticket).await)
}

/// Same as [`run_search`] with a caller-built descriptor.
pub async fn run_search_with(
    state: &ClientState,
    query: &str,
    strategy: SearchStrategy,
) -> Option<SearchView> {
    let ticket = state.search.write().begin_with(query, strategy)?;
    Some(execute(state, ticket).await)
}

async fn execute(state: &ClientState, ticket: SearchTicket) -> SearchView {
    let strategy = ticket.request.strategy();
    tracing::info!(
        "Search #{} ({}; syntactic {:?}, semantic {:?})",
        ticket.generation,
        strategy.aggregation_method,
        strategy.syntactic_methods,
        strategy.semantic_methods
    );

    let outcome = state.api.search(&ticket.request).await;
    if let Ok(resp) = &outcome {
        tracing::info!(
            "Search #{} returned {} results",
            ticket.generation,
            resp.search_results.len()
        );
    }

    let mut session = state.search.write();
    session.complete(ticket.generation, outcome);
    session.view()
}

/// GET /search/autocomplete
pub async fn suggest(state: &ClientState, prefix: &str) -> Result<Vec<String>, ApiError> {
    state.api.autocomplete(prefix).await
}

/// POST /search/update_click_count
pub async fn record_click(state: &ClientState, phrase: &str) -> Result<(), ApiError> {
    state.api.record_click(phrase).await
}
