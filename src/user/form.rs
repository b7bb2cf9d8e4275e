use maud::{Markup, html};

use crate::{
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base},
    navigation::NavBar,
    user::UserFormData,
};

/// How the user form is submitted.
pub(super) enum UserFormAction<'a> {
    Create { endpoint: &'a str },
    Update { endpoint: &'a str },
}

/// A full page containing the user form.
pub(super) fn user_form_page(
    title: &str,
    active_endpoint: &str,
    action: UserFormAction<'_>,
    values: &UserFormData,
) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { (title) }
            (user_form_view(action, values))
        }
    };

    base(title, &content)
}

fn user_form_view(action: UserFormAction<'_>, values: &UserFormData) -> Markup {
    let (hx_post, hx_put, button_text) = match action {
        UserFormAction::Create { endpoint } => (Some(endpoint), None, "Create User"),
        UserFormAction::Update { endpoint } => (None, Some(endpoint), "Update User"),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="full_name" class=(FORM_LABEL_STYLE) { "Full Name" }

                input
                    id="full_name"
                    type="text"
                    name="full_name"
                    placeholder="Full Name"
                    value=(values.full_name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    id="email"
                    type="email"
                    name="email"
                    placeholder="name@example.com"
                    value=(values.email)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (button_text) }
        }
    }
}
