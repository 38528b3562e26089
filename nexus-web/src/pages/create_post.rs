use crate::api::{ApiClient, ApiError};
use crate::models::NewPost;
use crate::state::{non_empty, parse_car_year};
use crate::Route;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

pub enum Msg {
    UpdateTitle(String),
    UpdateContent(String),
    UpdateImageUrl(String),
    UpdateCarMake(String),
    UpdateCarModel(String),
    UpdateCarYear(String),
    Submit,
    Created,
    Failed(ApiError),
}

pub struct CreatePost {
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

impl Component for CreatePost {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            image_url: String::new(),
            car_make: String::new(),
            car_model: String::new(),
            car_year: String::new(),
            submitting: false,
            error: None,
            api: ApiClient::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
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
                if self.title.trim().is_empty() {
                    self.error = Some("Title is required".to_string());
                    return true;
                }

                self.submitting = true;
                self.error = None;

                let new_post = NewPost {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    image_url: non_empty(&self.image_url),
                    car_make: non_empty(&self.car_make),
                    car_model: non_empty(&self.car_model),
                    car_year: parse_car_year(&self.car_year),
                    upvotes: 0,
                };

                let api = self.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api.create_post(&new_post).await {
                        Ok(_) => link.send_message(Msg::Created),
                        Err(e) => link.send_message(Msg::Failed(e)),
                    }
                });

                true
            }

            Msg::Created => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Home);
                }
                false
            }

            // Inputs are left as typed so the user can retry.
            Msg::Failed(e) => {
                log::error!("Insert error: {e}");
                self.submitting = false;
                self.error = Some(format!("Post failed to save: {e}"));
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let input = |f: fn(String) -> Msg| {
            ctx.link().callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                f(input.value())
            })
        };

        html! {
            <div class="create-post">
                <h1>{ "Create New Post" }</h1>

                if let Some(error) = &self.error {
                    <div class="error">{ error }</div>
                }

                <input
                    type="text"
                    placeholder="Post Title"
                    value={self.title.clone()}
                    oninput={input(Msg::UpdateTitle)}
                />
                <textarea
                    placeholder="Describe your build..."
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
                    { if self.submitting { "Submitting…" } else { "Submit" } }
                </button>
            </div>
        }
    }
}
