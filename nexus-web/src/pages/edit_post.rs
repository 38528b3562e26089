use crate::api::{ApiClient, ApiError};
use crate::models::{Post, PostPatch};
use crate::state::{non_empty, parse_car_year};
use crate::Route;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

pub enum Msg {
    Fetched(Result<Post, ApiError>),
    UpdateTitle(String),
    UpdateContent(String),
    UpdateImageUrl(String),
    UpdateCarMake(String),
    UpdateCarModel(String),
    UpdateCarYear(String),
    Submit,
    Saved(i64),
    SaveFailed(ApiError),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: i64,
}

pub struct EditPost {
    loaded: bool,
    missing: bool,
    title: String,
    content: String,
    image_url: String,
    car_make: String,
    car_model: String,
    car_year: String,
    submitting: bool,
    error: Option<String>,
    api: ApiClient,
}

impl Component for EditPost {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let id = ctx.props().id;
        let api = ApiClient::new();

        {
            let api = api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.get_post(id).await;
                link.send_message(Msg::Fetched(result));
            });
        }

        Self {
            loaded: false,
            missing: false,
            title: String::new(),
            content: String::new(),
            image_url: String::new(),
            car_make: String::new(),
            car_model: String::new(),
            car_year: String::new(),
            submitting: false,
            error: None,
            api,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetched(Ok(post)) => {
                self.loaded = true;
                self.title = post.title;
                self.content = post.content;
                self.image_url = post.image_url.unwrap_or_default();
                self.car_make = post.car_make.unwrap_or_default();
                self.car_model = post.car_model.unwrap_or_default();
                self.car_year = post.car_year.map(|y| y.to_string()).unwrap_or_default();
                true
            }

            Msg::Fetched(Err(e)) => {
                log::error!("Error fetching post for edit: {e}");
                self.missing = true;
                true
            }

            Msg::UpdateTitle(val) => {
                self.title = val;
                true
            }
            Msg::UpdateContent(val) => {
                self.content = val;
                true
            }
            Msg::UpdateImageUrl(val) => {
                self.image_url = val;
                true
            }
            Msg::UpdateCarMake(val) => {
                self.car_make = val;
                true
            }
            Msg::UpdateCarModel(val) => {
                self.car_model = val;
                true
            }
            Msg::UpdateCarYear(val) => {
                self.car_year = val;
                true
            }

            Msg::Submit => {
                if self.submitting {
                    return false;
                }

                self.submitting = true;
                self.error = None;

                let id = ctx.props().id;
                let patch = PostPatch {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    image_url: non_empty(&self.image_url),
                    car_make: non_empty(&self.car_make),
                    car_model: non_empty(&self.car_model),
                    car_year: parse_car_year(&self.car_year),
                };

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.update_post(id, &patch).await {
                        Ok(_) => link.send_message(Msg::Saved(id)),
                        Err(e) => link.send_message(Msg::SaveFailed(e)),
                    }
                });

                true
            }

            Msg::Saved(id) => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Post { id });
                }
                false
            }

            Msg::SaveFailed(e) => {
                log::error!("Update error: {e}");
                self.submitting = false;
                self.error = Some(format!("Failed to update post: {e}"));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.missing {
            return html! { <p class="not-found">{ "Post not found." }</p> };
        }
        if !self.loaded {
            return html! { <p class="loading">{ "Loading post..." }</p> };
        }

        let input = |f: fn(String) -> Msg| {
            ctx.link().callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                f(input.value())
            })
        };

        html! {
            <div class="edit-post">
                <h2>{ "Edit Post" }</h2>

                if let Some(error) = &self.error {
                    <div class="error">{ error }</div>
                }

                <input
                    type="text"
                    placeholder="Title"
                    value={self.title.clone()}
                    oninput={input(Msg::UpdateTitle)}
                />
                <textarea
                    placeholder="Content"
                    value={self.content.clone()}
                    oninput={ctx.link().callback(|e: InputEvent| {
                        let input: HtmlTextAreaElement = e.target_unchecked_into();
                        Msg::UpdateContent(input.value())
                    })}
                />
                <input
                    type="text"
                    placeholder="Image URL"
                    value={self.image_url.clone()}
                    oninput={input(Msg::UpdateImageUrl)}
                />
                <input
                    type="text"
                    placeholder="Car Make"
                    value={self.car_make.clone()}
                    oninput={input(Msg::UpdateCarMake)}
                />
                <input
                    type="text"
                    placeholder="Car Model"
                    value={self.car_model.clone()}
                    oninput={input(Msg::UpdateCarModel)}
                />
                <input
                    type="number"
                    placeholder="Car Year"
                    value={self.car_year.clone()}
                    oninput={input(Msg::UpdateCarYear)}
                />

                <button disabled={self.submitting} onclick={ctx.link().callback(|_| Msg::Submit)}>
                    { if self.submitting { "Saving…" } else { "Update Post" } }
                </button>
            </div>
        }
    }
}
