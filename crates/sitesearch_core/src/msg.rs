#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the search form.
    SearchSubmitted { url: String, query: String },
    /// A search started by `Effect::RunSearch` finished.
    SearchCompleted {
        handle: crate::SessionHandle,
        outcome: crate::SearchOutcome,
    },
    /// User toggled the HTML preview of the result at `index` (0-based).
    HtmlToggled { index: usize },
    /// User cleared the session.
    ResetClicked,
}
