use touchbase_shared::validation::{self, FieldErrors, FormField};
use touchbase_shared::Contact;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services;

#[derive(Properties, PartialEq)]
pub struct ContactInfoModalProps {
    pub contact: Contact,
    pub on_updated: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ContactInfoModal)]
pub fn contact_info_modal(props: &ContactInfoModalProps) -> Html {
    let editing = use_state(|| false);
    let saving = use_state(|| false);
    let deleting = use_state(|| false);
    let name = use_state(|| props.contact.name.clone());
    let date = use_state(|| props.contact.last_contact_date.to_string());
    let replacement = use_state(|| None::<web_sys::File>);
    let field_errors = use_state(FieldErrors::default);
    let action_error = use_state(|| None::<String>);

    // Selecting a different contact resets any in-progress edit
    {
        let editing = editing.clone();
        let name = name.clone();
        let date = date.clone();
        let replacement = replacement.clone();
        let field_errors = field_errors.clone();
        let action_error = action_error.clone();

        use_effect_with(props.contact.clone(), move |contact| {
            editing.set(false);
            name.set(contact.name.clone());
            date.set(contact.last_contact_date.to_string());
            replacement.set(None);
            field_errors.set(FieldErrors::default());
            action_error.set(None);
            || ()
        });
    }

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
        let replacement = replacement.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            replacement.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let start_editing = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(true))
    };

    let on_save = {
        let contact = props.contact.clone();
        let editing = editing.clone();
        let saving = saving.clone();
        let name = name.clone();
        let date = date.clone();
        let replacement = replacement.clone();
        let field_errors = field_errors.clone();
        let action_error = action_error.clone();
        let on_updated = props.on_updated.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name_value = (*name).clone();
            let date_value = (*date).clone();

            let errors = validation::validate_contact_edit(&name_value, &date_value);
            if !errors.is_empty() {
                field_errors.set(errors);
                return;
            }
            field_errors.set(FieldErrors::default());

            // Present once validation has passed
            let Some(parsed_date) = validation::parse_date(&date_value) else {
                return;
            };

            saving.set(true);
            action_error.set(None);

            let contact = contact.clone();
            let picked = (*replacement).clone();
            let editing = editing.clone();
            let saving = saving.clone();
            let action_error = action_error.clone();
            let on_updated = on_updated.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                let avatar = match picked {
                    Some(file) => match services::read_avatar(&file).await {
                        Ok(avatar) => Some(avatar),
                        Err(msg) => {
                            action_error.set(Some(format!("Could not read the image: {msg}")));
                            saving.set(false);
                            return;
                        }
                    },
                    None => None,
                };

                match services::supabase()
                    .update_contact(contact.id, &name_value, parsed_date, &contact.image_url, avatar)
                    .await
                {
                    Ok(_) => {
                        saving.set(false);
                        editing.set(false);
                        on_updated.emit(());
                        on_close.emit(());
                    }
                    Err(err) => {
                        services::log_error("updating contact", &err);
                        action_error.set(Some(err.to_string()));
                        saving.set(false);
                    }
                }
            });
        })
    };

    let on_delete = {
        let contact_id = props.contact.id;
        let deleting = deleting.clone();
        let action_error = action_error.clone();
        let on_updated = props.on_updated.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |_: MouseEvent| {
            deleting.set(true);
            action_error.set(None);

            let deleting = deleting.clone();
            let action_error = action_error.clone();
            let on_updated = on_updated.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                match services::supabase().delete_contact(contact_id).await {
                    Ok(()) => {
                        deleting.set(false);
                        on_updated.emit(());
                        on_close.emit(());
                    }
                    Err(err) => {
                        services::log_error("deleting contact", &err);
                        action_error.set(Some(err.to_string()));
                        deleting.set(false);
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
                        <h3 class="text-lg font-medium" style="color: var(--fg-primary);">{"Contact Info"}</h3>
                        <button onclick={close.clone()} class="hover:opacity-75" style="color: var(--fg-muted);">
                            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                            </svg>
                        </button>
                    </div>

                    <form onsubmit={on_save}>
                        <div class="p-6 space-y-4">
                            <img
                                src={props.contact.image_url.clone()}
                                alt="avatar"
                                class="w-20 h-20 rounded-full object-cover"
                            />

                            // Name
                            <div>
                                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{"Name"}</label>
                                <input
                                    type="text"
                                    value={(*name).clone()}
                                    oninput={on_name_input}
                                    disabled={!*editing || *saving}
                                    class="w-full rounded-lg px-3 py-2 border focus:ring-blue-500 focus:border-blue-500 disabled:opacity-60"
                                    style="background-color: var(--bg-input); border-color: var(--border-primary); color: var(--fg-primary);"
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
                                    disabled={!*editing || *saving}
                                    class="w-full rounded-lg px-3 py-2 border focus:ring-blue-500 focus:border-blue-500 disabled:opacity-60"
                                    style="background-color: var(--bg-input); border-color: var(--border-primary); color: var(--fg-primary);"
                                />
                                if let Some(msg) = field_errors.get(FormField::Date) {
                                    <p class="mt-1 text-sm text-red-400">{msg}</p>
                                }
                            </div>

                            // Replacement image, optional
                            if *editing {
                                <div>
                                    <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{"Replace image"}</label>
                                    <input
                                        type="file"
                                        accept="image/*"
                                        onchange={on_file_change}
                                        disabled={*saving}
                                        class="w-full text-sm"
                                        style="color: var(--fg-muted);"
                                    />
                                </div>
                            }

                            if let Some(ref msg) = *action_error {
                                <div class="rounded-lg border border-red-500/40 bg-red-500/10 p-3 text-sm text-red-400">
                                    {msg}
                                </div>
                            }
                        </div>

                        <div class="px-6 py-4 border-t flex justify-end space-x-3" style="border-color: var(--border-primary);">
                            if *editing {
                                <button
                                    type="submit"
                                    disabled={*saving}
                                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg disabled:opacity-50"
                                >
                                    if *saving {
                                        {"Saving..."}
                                    } else {
                                        {"Save"}
                                    }
                                </button>
                            } else {
                                <button
                                    type="button"
                                    onclick={start_editing}
                                    class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg"
                                >
                                    {"Edit"}
                                </button>
                                <button
                                    type="button"
                                    onclick={on_delete}
                                    disabled={*deleting}
                                    class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg disabled:opacity-50"
                                >
                                    if *deleting {
                                        {"Deleting..."}
                                    } else {
                                        {"Delete"}
                                    }
                                </button>
                            }
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
