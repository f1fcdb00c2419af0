use touchbase_shared::Contact;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{ContactInfoModal, NewContactModal};
use crate::services;
use crate::theme::ThemeToggle;

#[function_component(ContactsPage)]
pub fn contacts_page() -> Html {
    let contacts = use_state(Vec::<Contact>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let selected = use_state(|| None::<Contact>);
    let show_new_modal = use_state(|| false);
    let reload = use_state(|| 0u32);

    // Load contacts, longest-silent first
    {
        let contacts = contacts.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_effect_with(*reload, move |_| {
            loading.set(true);
            spawn_local(async move {
                match services::supabase().list_contacts().await {
                    Ok(rows) => {
                        contacts.set(rows);
                        error.set(None);
                        loading.set(false);
                    }
                    Err(err) => {
                        services::log_error("loading contacts", &err);
                        error.set(Some(err.to_string()));
                        loading.set(false);
                    }
                }
            });
            || ()
        });
    }

    let refresh = {
        let reload = reload.clone();
        Callback::from(move |_: ()| reload.set(*reload + 1))
    };

    let open_new_modal = {
        let show_new_modal = show_new_modal.clone();
        Callback::from(move |_| show_new_modal.set(true))
    };

    let close_new_modal = {
        let show_new_modal = show_new_modal.clone();
        Callback::from(move |_: ()| show_new_modal.set(false))
    };

    let on_card_click = {
        let selected = selected.clone();
        Callback::from(move |contact: Contact| selected.set(Some(contact)))
    };

    let close_info_modal = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };

    html! {
        <div class="p-6 space-y-6 min-h-screen" style="background-color: var(--bg-primary);">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Contacts"}</h1>
                    <p style="color: var(--fg-muted);">{"Keep track of who you last reached out to"}</p>
                </div>
                <div class="flex items-center space-x-3">
                    <ThemeToggle />
                    <button
                        onclick={open_new_modal}
                        class="bg-blue-600 hover:bg-blue-700 text-white px-4 py-2 rounded-lg flex items-center space-x-2"
                    >
                        <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4v16m8-8H4"/>
                        </svg>
                        <span>{"Add Contact"}</span>
                    </button>
                </div>
            </div>

            // Contact cards
            if *loading {
                <div class="flex flex-col justify-center items-center h-64">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-blue-500"></div>
                    <p class="mt-4" style="color: var(--fg-muted);">{"Loading contacts..."}</p>
                </div>
            } else if let Some(ref err) = *error {
                <div class="rounded-lg border border-red-500/40 bg-red-500/10 p-4 text-red-400">
                    {"Could not load contacts: "}{err}
                </div>
            } else if contacts.is_empty() {
                <p style="color: var(--fg-muted);">{"No contacts found."}</p>
            } else {
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    { for contacts.iter().map(|contact| {
                        html! {
                            <ContactCard
                                key={contact.id.to_string()}
                                contact={contact.clone()}
                                on_click={on_card_click.clone()}
                            />
                        }
                    })}
                </div>
            }

            // Modals
            if *show_new_modal {
                <NewContactModal on_created={refresh.clone()} on_close={close_new_modal} />
            }
            if let Some(ref contact) = *selected {
                <ContactInfoModal
                    contact={contact.clone()}
                    on_updated={refresh.clone()}
                    on_close={close_info_modal}
                />
            }
        </div>
    }
}

// Contact Card Component
#[derive(Properties, PartialEq)]
struct ContactCardProps {
    contact: Contact,
    on_click: Callback<Contact>,
}

#[function_component(ContactCard)]
fn contact_card(props: &ContactCardProps) -> Html {
    let contact = &props.contact;

    let onclick = {
        let contact = contact.clone();
        let on_click = props.on_click.clone();
        Callback::from(move |_| on_click.emit(contact.clone()))
    };

    html! {
        <div
            onclick={onclick}
            class="p-4 rounded-lg border cursor-pointer transition-colors hover:border-blue-500"
            style="background-color: var(--bg-secondary); border-color: var(--border-primary);"
        >
            <img src={contact.image_url.clone()} alt="avatar" class="w-16 h-16 rounded-full mb-2 object-cover" />
            <p class="font-medium" style="color: var(--fg-primary);">{&contact.name}</p>
            <p class="text-sm" style="color: var(--fg-muted);">
                {"Last contacted: "}{contact.last_contact_date.to_string()}
            </p>
        </div>
    }
}
