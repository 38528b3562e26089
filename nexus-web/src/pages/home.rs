use crate::api::{ApiClient, ApiError};
use crate::models::{Post, SortKey};
use crate::state::{filter_posts, FetchSeq};
use crate::Route;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

pub enum Msg {
    Load,
    Loaded(u32, Vec<Post>),
    LoadFailed(u32, ApiError),
    SetSearch(String),
    SetSort(SortKey),
    Upvote(i64, i64),
    UpvoteDone,
    UpvoteFailed(ApiError),
}

pub struct Home {
    posts: Vec<Post>,
    search: String,
    sort: SortKey,
    fetch_seq: FetchSeq,
    loading: bool,
    error: Option<String>,
    api: ApiClient,
}

impl Component for Home {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);

        Self {
            posts: Vec::new(),
            search: String::new(),
            sort: SortKey::Newest,
            fetch_seq: FetchSeq::default(),
            loading: false,
            error: None,
            api: ApiClient::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                self.loading = true;
                self.error = None;

                let seq = self.fetch_seq.next();
                let sort = self.sort;
                let api = self.api.clone();
                let link = ctx.link().clone();

                spawn_local(async move {
                    match api.list_posts(sort).await {
                        Ok(posts) => link.send_message(Msg::Loaded(seq, posts)),
                        Err(e) => link.send_message(Msg::LoadFailed(seq, e)),
                    }
                });

                true
            }

            Msg::Loaded(seq, posts) => {
                // A newer fetch has superseded this response.
                if !self.fetch_seq.is_current(seq) {
                    return false;
                }
                self.posts = posts;
                self.loading = false;
                true
            }

            Msg::LoadFailed(seq, e) => {
                if !self.fetch_seq.is_current(seq) {
                    return false;
                }
                log::error!("Error fetching posts: {e}");
                // The prior list stays visible.
                self.loading = false;
                self.error = Some(format!("Failed to load posts: {e}"));
                true
            }

            Msg::SetSearch(text) => {
                self.search = text;
                true
            }

            Msg::SetSort(sort) => {
                if self.sort != sort {
                    self.sort = sort;
                    ctx.link().send_message(Msg::Load);
                }
                true
            }

            // No optimistic update on this path: the re-fetch after the
            // write reflects both the new count and the new ordering.
            Msg::Upvote(id, current_upvotes) => {
                let api = self.api.clone();
                let link = ctx.link().clone();

                spawn_local(async move {
                    match api.upvote_post(id, current_upvotes + 1).await {
                        Ok(_) => link.send_message(Msg::UpvoteDone),
                        Err(e) => link.send_message(Msg::UpvoteFailed(e)),
                    }
                });

                false
            }

            Msg::UpvoteDone => {
                ctx.link().send_message(Msg::Load);
                false
            }

            Msg::UpvoteFailed(e) => {
                log::error!("Error upvoting post: {e}");
                self.error = Some(format!("Failed to upvote: {e}"));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let filtered = filter_posts(&self.posts, &self.search);

        html! {
            <div class="home">
                <h1 class="app-title">{ "Welcome To OctaneNexus" }</h1>

                { self.view_error() }

                <div class="nav-controls">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search posts"
                        value={self.search.clone()}
                        oninput={ctx.link().callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetSearch(input.value())
                        })}
                    />
                    <Link<Route> to={Route::Create} classes="create-link">
                        { "Create New Post" }
                    </Link<Route>>
                </div>

                <div class="sort-buttons">
                    <button
                        class={if self.sort == SortKey::Newest { "active" } else { "" }}
                        onclick={ctx.link().callback(|_| Msg::SetSort(SortKey::Newest))}
                    >
                        { "Newest" }
                    </button>
                    <button
                        class={if self.sort == SortKey::Popular { "active" } else { "" }}
                        onclick={ctx.link().callback(|_| Msg::SetSort(SortKey::Popular))}
                    >
                        { "Most Popular" }
                    </button>
                </div>

                if self.loading && self.posts.is_empty() {
                    <p class="loading">{ "Loading posts..." }</p>
                }

                <div class="post-list">
                    { for filtered.iter().map(|post| self.view_card(post, ctx)) }
                </div>

                if filtered.is_empty() && !self.loading {
                    <p>{ "No posts match." }</p>
                }
            </div>
        }
    }
}

impl Home {
    fn view_error(&self) -> Html {
        match &self.error {
            Some(error) => html! { <div class="error">{ error }</div> },
            None => html! {},
        }
    }

    fn view_card(&self, post: &Post, ctx: &Context<Self>) -> Html {
        let id = post.id;
        let current_upvotes = post.upvotes;
        let upvote = ctx
            .link()
            .callback(move |_| Msg::Upvote(id, current_upvotes));

        html! {
            <div class="post-card" key={id}>
                <Link<Route> to={Route::Post { id }}>
                    <h2>{ &post.title }</h2>
                    <p>{ &post.created_at }</p>
                </Link<Route>>
                <button class="upvote-button" onclick={upvote}>
                    { format!("🔼 {} upvotes", post.upvotes) }
                </button>
            </div>
        }
    }
}
