//! View-state logic shared by the pages, kept free of browser types so it
//! runs under plain `cargo test`.

use crate::models::Post;

/// Case-insensitive substring filter on post titles. Purely derived from
/// the fetched list; recomputed on every keystroke.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.title.to_lowercase().contains(&needle))
        .collect()
}

/// Form input for a car year: blank or non-numeric input means "not set".
pub fn parse_car_year(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}

/// Optional text field: a blank input means the column is not set.
pub fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Monotonic key for in-flight fetches. A response tagged with an older
/// sequence number is stale and must be dropped, so out-of-order arrivals
/// cannot overwrite newer state.
#[derive(Debug, Default)]
pub struct FetchSeq(u32);

impl FetchSeq {
    /// Start a new fetch, superseding any still in flight.
    pub fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn is_current(&self, seq: u32) -> bool {
        self.0 == seq
    }
}

/// Detail-view lifecycle. `NotFound` is terminal for an id; only
/// navigating to a different id re-enters `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Post),
    NotFound,
}

impl DetailState {
    pub fn resolve(self, fetched: Option<Post>) -> DetailState {
        match (self, fetched) {
            // NotFound is terminal: a late-arriving row does not revive it.
            (DetailState::NotFound, _) => DetailState::NotFound,
            (_, Some(post)) => DetailState::Loaded(post),
            (_, None) => DetailState::NotFound,
        }
    }

    pub fn post(&self) -> Option<&Post> {
        match self {
            DetailState::Loaded(post) => Some(post),
            _ => None,
        }
    }
}

/// Optimistic upvote as an explicit local transaction: snapshot the
/// pre-increment count, apply the speculative value, then either replace
/// with the server row or restore the snapshot.
#[derive(Debug)]
pub struct UpvoteTxn {
    snapshot: i64,
}

impl UpvoteTxn {
    pub fn begin(post: &mut Post) -> Self {
        let snapshot = post.upvotes;
        post.upvotes = snapshot + 1;
        Self { snapshot }
    }

    /// The value the update request must carry: pre-increment count + 1.
    pub fn requested_upvotes(&self) -> i64 {
        self.snapshot + 1
    }

    /// Server confirmed: its returned row is authoritative.
    pub fn commit(self, post: &mut Post, server_row: Post) {
        *post = server_row;
    }

    pub fn roll_back(self, post: &mut Post) {
        post.upvotes = self.snapshot;
    }
}

/// Comment composer state. Re-submission is blocked while a request is in
/// flight; a failed submission keeps the draft text for retry.
#[derive(Debug, Default)]
pub struct CommentDraft {
    text: String,
    in_flight: bool,
}

impl CommentDraft {
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.text.trim().is_empty()
    }

    /// Returns the trimmed content to send, or None for an empty draft
    /// (which must issue no request).
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        Some(self.text.trim().to_string())
    }

    pub fn finish_success(&mut self) {
        self.in_flight = false;
        self.text.clear();
    }

    pub fn finish_failure(&mut self) {
        self.in_flight = false;
        // Draft text is kept so the user can retry.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str, upvotes: i64) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: String::new(),
            image_url: None,
            car_make: None,
            car_model: None,
            car_year: None,
            upvotes,
            created_at: "2024-05-01T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let posts = vec![
            post(1, "Turbo Civic", 0),
            post(2, "NA Miata", 0),
            post(3, "civic on coilovers", 0),
        ];

        let hits = filter_posts(&posts, "CIVIC");
        let ids: Vec<i64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn filter_is_idempotent() {
        let posts = vec![post(1, "Turbo Civic", 0), post(2, "NA Miata", 0)];

        let once: Vec<Post> = filter_posts(&posts, "civ").into_iter().cloned().collect();
        let twice: Vec<Post> = filter_posts(&once, "civ").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_query_matches_everything() {
        let posts = vec![post(1, "Turbo Civic", 0), post(2, "NA Miata", 0)];
        assert_eq!(filter_posts(&posts, "").len(), 2);
    }

    #[test]
    fn car_year_parses_integers_only() {
        assert_eq!(parse_car_year("2020"), Some(2020));
        assert_eq!(parse_car_year(" 1997 "), Some(1997));
        assert_eq!(parse_car_year(""), None);
        assert_eq!(parse_car_year("two thousand"), None);
    }

    #[test]
    fn blank_optional_fields_are_not_set() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty("Honda"), Some("Honda".to_string()));
    }

    #[test]
    fn stale_fetch_sequence_is_not_current() {
        let mut seq = FetchSeq::default();
        let first = seq.next();
        let second = seq.next();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn detail_state_loads_and_misses() {
        let loaded = DetailState::Loading.resolve(Some(post(1, "Turbo Civic", 0)));
        assert!(matches!(loaded, DetailState::Loaded(_)));

        let missing = DetailState::Loading.resolve(None);
        assert_eq!(missing, DetailState::NotFound);
    }

    #[test]
    fn not_found_is_terminal() {
        let state = DetailState::NotFound.resolve(Some(post(1, "late arrival", 0)));
        assert_eq!(state, DetailState::NotFound);
    }

    #[test]
    fn upvote_txn_applies_and_commits_server_row() {
        let mut current = post(1, "Turbo Civic", 5);

        let txn = UpvoteTxn::begin(&mut current);
        assert_eq!(current.upvotes, 6);
        assert_eq!(txn.requested_upvotes(), 6);

        let server_row = post(1, "Turbo Civic", 6);
        txn.commit(&mut current, server_row);
        assert_eq!(current.upvotes, 6);
    }

    #[test]
    fn upvote_txn_rolls_back_to_snapshot() {
        let mut current = post(1, "Turbo Civic", 5);

        let txn = UpvoteTxn::begin(&mut current);
        assert_eq!(current.upvotes, 6);

        txn.roll_back(&mut current);
        assert_eq!(current.upvotes, 5);
    }

    #[test]
    fn whitespace_draft_cannot_submit() {
        let mut draft = CommentDraft::default();
        draft.set_text("   \n ".to_string());

        assert!(!draft.can_submit());
        assert_eq!(draft.begin_submit(), None);
        assert_eq!(draft.text(), "   \n ");
    }

    #[test]
    fn submission_blocks_resubmit_until_resolved() {
        let mut draft = CommentDraft::default();
        draft.set_text("  nice build  ".to_string());

        assert_eq!(draft.begin_submit(), Some("nice build".to_string()));
        assert!(draft.in_flight());
        assert_eq!(draft.begin_submit(), None);

        draft.finish_success();
        assert_eq!(draft.text(), "");
    }

    #[test]
    fn failed_submission_keeps_the_draft() {
        let mut draft = CommentDraft::default();
        draft.set_text("worth retrying".to_string());

        draft.begin_submit();
        draft.finish_failure();

        assert_eq!(draft.text(), "worth retrying");
        assert!(draft.can_submit());
    }
}
