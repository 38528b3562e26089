use crate::api::{ApiClient, ApiError};
use crate::models::{Comment, NewComment, Post};
use crate::state::{CommentDraft, DetailState, FetchSeq, UpvoteTxn};
use crate::Route;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;
use yew_router::prelude::*;

pub enum Msg {
    Fetch,
    PostFetched(u32, Result<Post, ApiError>),
    CommentsFetched(u32, Result<Vec<Comment>, ApiError>),
    UpdateDraft(String),
    SubmitComment,
    CommentAdded(Comment),
    CommentFailed(ApiError),
    Upvote,
    UpvoteCommitted(Post),
    UpvoteFailed(ApiError),
    Delete,
    Deleted,
    DeleteFailed(ApiError),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: i64,
}

pub struct PostPage {
    state: DetailState,
    comments: Vec<Comment>,
    draft: CommentDraft,
    upvote_txn: Option<UpvoteTxn>,
    fetch_seq: FetchSeq,
    error: Option<String>,
    api: ApiClient,
}

impl Component for PostPage {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Fetch);

        Self {
            state: DetailState::Loading,
            comments: Vec::new(),
            draft: CommentDraft::default(),
            upvote_txn: None,
            fetch_seq: FetchSeq::default(),
            error: None,
            api: ApiClient::new(),
        }
    }

    // Navigating to a different post id restarts the lifecycle; NotFound
    // stays terminal for the id it was reached under.
    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().id != old_props.id {
            self.state = DetailState::Loading;
            self.comments.clear();
            self.draft = CommentDraft::default();
            self.upvote_txn = None;
            self.error = None;
            ctx.link().send_message(Msg::Fetch);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let id = ctx.props().id;

        match msg {
            // Two independent requests keyed by the same id and sequence.
            Msg::Fetch => {
                let seq = self.fetch_seq.next();

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.get_post(id).await;
                    link.send_message(Msg::PostFetched(seq, result));
                });

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.list_comments(id).await;
                    link.send_message(Msg::CommentsFetched(seq, result));
                });

                true
            }

            Msg::PostFetched(seq, result) => {
                if !self.fetch_seq.is_current(seq) {
                    return false;
                }

                let fetched = match result {
                    Ok(post) => Some(post),
                    Err(e) => {
                        if !matches!(e, ApiError::NotFound) {
                            log::error!("Error fetching post {id}: {e}");
                        }
                        None
                    }
                };

                let previous = std::mem::replace(&mut self.state, DetailState::Loading);
                self.state = previous.resolve(fetched);
                true
            }

            Msg::CommentsFetched(seq, result) => {
                if !self.fetch_seq.is_current(seq) {
                    return false;
                }
                self.comments = match result {
                    Ok(comments) => comments,
                    Err(e) => {
                        log::error!("Fetch comments error: {e}");
                        Vec::new()
                    }
                };
                true
            }

            Msg::UpdateDraft(text) => {
                self.draft.set_text(text);
                true
            }

            Msg::SubmitComment => {
                let Some(content) = self.draft.begin_submit() else {
                    return false;
                };

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let new_comment = NewComment {
                        post_id: id,
                        content,
                    };
                    match api.add_comment(&new_comment).await {
                        Ok(comment) => link.send_message(Msg::CommentAdded(comment)),
                        Err(e) => link.send_message(Msg::CommentFailed(e)),
                    }
                });

                true
            }

            // Append without a refetch for snappier UX.
            Msg::CommentAdded(comment) => {
                self.comments.push(comment);
                self.draft.finish_success();
                true
            }

            Msg::CommentFailed(e) => {
                log::error!("Add comment error: {e}");
                self.draft.finish_failure();
                self.error = Some(format!("Failed to add comment: {e}"));
                true
            }

            Msg::Upvote => {
                if self.upvote_txn.is_some() {
                    return false;
                }
                let DetailState::Loaded(post) = &mut self.state else {
                    return false;
                };

                // Optimistic increment; the request carries the
                // pre-increment count + 1 (read-modify-write, so
                // concurrent upvoters can lose updates).
                let txn = UpvoteTxn::begin(post);
                let requested = txn.requested_upvotes();
                self.upvote_txn = Some(txn);

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.upvote_post(id, requested).await {
                        Ok(row) => link.send_message(Msg::UpvoteCommitted(row)),
                        Err(e) => link.send_message(Msg::UpvoteFailed(e)),
                    }
                });

                true
            }

            Msg::UpvoteCommitted(server_row) => {
                if let (Some(txn), DetailState::Loaded(post)) =
                    (self.upvote_txn.take(), &mut self.state)
                {
                    txn.commit(post, server_row);
                }
                true
            }

            Msg::UpvoteFailed(e) => {
                log::error!("Upvote error: {e}");
                if let (Some(txn), DetailState::Loaded(post)) =
                    (self.upvote_txn.take(), &mut self.state)
                {
                    txn.roll_back(post);
                }
                self.error = Some(format!("Failed to upvote: {e}"));
                true
            }

            Msg::Delete => {
                let confirmed = web_sys::window()
                    .map(|w| {
                        w.confirm_with_message("Are you sure you want to delete this post?")
                            .unwrap_or(false)
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return false;
                }

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.delete_post(id).await {
                        Ok(()) => link.send_message(Msg::Deleted),
                        Err(e) => link.send_message(Msg::DeleteFailed(e)),
                    }
                });

                false
            }

            Msg::Deleted => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Home);
                }
                false
            }

            Msg::DeleteFailed(e) => {
                log::error!("Delete error: {e}");
                self.error = Some(format!("Failed to delete post: {e}"));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.state {
            DetailState::Loading => html! { <p class="loading">{ "Loading post..." }</p> },
            DetailState::NotFound => html! { <p class="not-found">{ "Post not found." }</p> },
            DetailState::Loaded(post) => self.view_post(post, ctx),
        }
    }
}

impl PostPage {
    fn view_post(&self, post: &Post, ctx: &Context<Self>) -> Html {
        let edit_route = Route::Edit { id: post.id };
        let vehicle = post.vehicle_line();

        html! {
            <div class="post-detail">
                { self.view_error() }

                <h1>{ &post.title }</h1>
                <p class="post-meta">
                    if !vehicle.is_empty() {
                        <>
                            <span class="vehicle">{ vehicle }</span>
                            { " · " }
                        </>
                    }
                    <span>{ &post.created_at }</span>
                </p>

                if let Some(image_url) = &post.image_url {
                    <img class="post-image" src={image_url.clone()} alt="Post" />
                }

                <p class="post-content">{ &post.content }</p>

                <div class="post-actions">
                    <button class="upvote-button" onclick={ctx.link().callback(|_| Msg::Upvote)}>
                        { format!("🔼 Upvote ({})", post.upvotes) }
                    </button>
                    <Link<Route> to={edit_route} classes="edit-link">{ "Edit Post" }</Link<Route>>
                    <button class="delete-button" onclick={ctx.link().callback(|_| Msg::Delete)}>
                        { "Delete Post" }
                    </button>
                </div>

                { self.view_comments(ctx) }
            </div>
        }
    }

    fn view_error(&self) -> Html {
        match &self.error {
            Some(error) => html! { <div class="error">{ error }</div> },
            None => html! {},
        }
    }

    fn view_comments(&self, ctx: &Context<Self>) -> Html {
        let submit_label = if self.draft.in_flight() {
            "Posting…"
        } else {
            "Submit Comment"
        };

        html! {
            <div class="comments">
                <h2>{ "Comments" }</h2>

                if self.comments.is_empty() {
                    <p class="no-comments">{ "No comments yet. Be the first!" }</p>
                } else {
                    <div class="comment-list">
                        { for self.comments.iter().map(|comment| html! {
                            <div class="comment" key={comment.id}>
                                <p>{ &comment.content }</p>
                                <p class="comment-meta">{ &comment.created_at }</p>
                            </div>
                        }) }
                    </div>
                }

                <textarea
                    placeholder="Leave a comment..."
                    value={self.draft.text().to_string()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::UpdateDraft(input.value())
                    })}
                />
                <button
                    disabled={!self.draft.can_submit()}
                    onclick={ctx.link().callback(|_| Msg::SubmitComment)}
                >
                    { submit_label }
                </button>
            </div>
        }
    }
}
