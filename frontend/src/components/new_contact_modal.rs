use touchbase_shared::validation::{self, FieldErrors, FormField};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services;

#[derive(Properties, PartialEq)]
pub struct NewContactModalProps {
    pub on_created: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(NewContactModal)]
pub fn new_contact_modal(props: &NewContactModalProps) -> Html {
    let name = use_state(String::new);
    let date = use_state(String::new);
    let image = use_state(|| None::<web_sys::File>);
    let field_errors = use_state(FieldErrors::default);
    let submit_error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_date_input = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let on_file_change = {
        let image = image.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            image.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let on_submit = {
        let name = name.clone();
        let date = date.clone();
        let image = image.clone();
        let field_errors = field_errors.clone();
        let submit_error = submit_error.clone();
        let submitting = submitting.clone();
        let on_created = props.on_created.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name_value = (*name).clone();
            let date_value = (*date).clone();

            let errors = validation::validate_new_contact(&name_value, &date_value, image.is_some());
            if !errors.is_empty() {
                field_errors.set(errors);
                return;
            }
            field_errors.set(FieldErrors::default());

            // Both are present once validation has passed
            let Some(parsed_date) = validation::parse_date(&date_value) else {
                return;
            };
            let Some(file) = (*image).clone() else {
                return;
            };

            submitting.set(true);
            submit_error.set(None);

            let name = name.clone();
            let date = date.clone();
            let image = image.clone();
            let submit_error = submit_error.clone();
            let submitting = submitting.clone();
            let on_created = on_created.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                let avatar = match services::read_avatar(&file).await {
                    Ok(avatar) => avatar,
                    Err(msg) => {
                        submit_error.set(Some(format!("Could not read the image: {msg}")));
                        submitting.set(false);
                        return;
                    }
                };

                match services::supabase()
                    .create_contact(&name_value, parsed_date, avatar)
                    .await
                {
                    Ok(_) => {
                        submitting.set(false);
                        name.set(String::new());
                        date.set(String::new());
                        image.set(None);
                        on_created.emit(());
                        on_close.emit(());
                    }
                    Err(err) => {
                        services::log_error("creating contact", &err);
                        submit_error.set(Some(err.to_string()));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    html! {
        <div class="fixed inset-0 z-50 overflow-y-auto">
            <div class="flex min-h-full items-center justify-center p-4">
                // Backdrop
                <div class="fixed inset-0 bg-black/50" onclick={close.clone()}></div>

                // Modal
                <div
                    class="relative rounded-lg shadow-xl border w-full max-w-lg"
                    style="background-color: var(--bg-secondary); border-color: var(--border-primary);"
                >
                    <div class="px-6 py-4 border-b flex items-center justify-between" style="border-color: var(--border-primary);">
                        <h3 class="text-lg font-medium" style="color: var(--fg-primary);">{"New Contact"}</h3>
                        <button onclick={close.clone()} class="hover:opacity-75" style="color: var(--fg-muted);">
                            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                            </svg>
                        </button>
                    </div>

                    <form onsubmit={on_submit}>
                        <div class="p-6 space-y-4">
                            // Name
                            <div>
                                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{"Name"}</label>
                                <input
                                    type="text"
                                    value={(*name).clone()}
                                    oninput={on_name_input}
                                    class="w-full rounded-lg px-3 py-2 border focus:ring-blue-500 focus:border-blue-500"
                                    style="background-color: var(--bg-input); border-color: var(--border-primary); color: var(--fg-primary);"
                                    placeholder="Name"
                                />
                                if let Some(msg) = field_errors.get(FormField::Name) {
                                    <p class="mt-1 text-sm text-red-400">{msg}</p>
                                }
                            </div>

                            // Last contact date
                            <div>
                                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{"Last contact date"}</label>
                                <input
                                    type="date"
                                    value={(*date).clone()}
                                    oninput={on_date_input}
                                    class="w-full rounded-lg px-3 py-2 border focus:ring-blue-500 focus:border-blue-500"
                                    style="background-color: var(--bg-input); border-color: var(--border-primary); color: var(--fg-primary);"
                                />
                                if let Some(msg) = field_errors.get(FormField::Date) {
                                    <p class="mt-1 text-sm text-red-400">{msg}</p>
                                }
                            </div>

                            // Avatar image
                            <div>
                                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{"Image"}</label>
                                <input
                                    type="file"
                                    accept="image/*"
                                    onchange={on_file_change}
                                    class="w-full text-sm"
                                    style="color: var(--fg-muted);"
                                />
                                if let Some(msg) = field_errors.get(FormField::Image) {
                                    <p class="mt-1 text-sm text-red-400">{msg}</p>
                                }
                            </div>

                            if let Some(ref msg) = *submit_error {
                                <div class="rounded-lg border border-red-500/40 bg-red-500/10 p-3 text-sm text-red-400">
                                    {msg}
                                </div>
                            }
                        </div>

                        <div class="px-6 py-4 border-t flex justify-end space-x-3" style="border-color: var(--border-primary);">
                            <button
                                type="button"
                                onclick={close.clone()}
                                class="px-4 py-2 hover:opacity-75"
                                style="color: var(--fg-muted);"
                            >
                                {"Cancel"}
                            </button>
                            <button
                                type="submit"
                                disabled={*submitting}
                                class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg disabled:opacity-50"
                            >
                                if *submitting {
                                    {"Creating contact..."}
                                } else {
                                    {"Create"}
                                }
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
