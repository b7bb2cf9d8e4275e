use maud::{Markup, html};

use crate::{
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base},
    navigation::NavBar,
};

/// A page with the single-field category form.
///
/// The form is submitted with `hx-put` when `is_update` is set and `hx-post` otherwise.
pub(super) fn category_form_page(
    title: &str,
    active_endpoint: &str,
    submit_endpoint: &str,
    is_update: bool,
    category_name: &str,
) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let button_text = if is_update {
        "Update Category"
    } else {
        "Create Category"
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { (title) }

            form
                hx-post=[(!is_update).then_some(submit_endpoint)]
                hx-put=[is_update.then_some(submit_endpoint)]
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

                    input
                        id="name"
                        type="text"
                        name="name"
                        placeholder="e.g. Groceries"
                        value=(category_name)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (button_text) }
            }
        }
    };

    base(title, &content)
}
