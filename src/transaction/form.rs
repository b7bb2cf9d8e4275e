use maud::{Markup, html};

use crate::{
    category::Category,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    transaction::{MAX_AMOUNT, TransactionFormData, TransactionType},
    user::User,
};

/// How the transaction form is submitted.
pub(super) enum TransactionFormAction<'a> {
    Create { endpoint: &'a str },
    Update { endpoint: &'a str },
}

/// The users and categories a transaction can refer to.
pub(super) struct TransactionFormChoices<'a> {
    pub users: &'a [User],
    pub categories: &'a [Category],
}

/// A full page containing the transaction form.
pub(super) fn transaction_form_page(
    title: &str,
    active_endpoint: &str,
    action: TransactionFormAction<'_>,
    choices: &TransactionFormChoices<'_>,
    values: &TransactionFormData,
) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { (title) }
            (transaction_form_view(action, choices, values))
        }
    };

    base(title, &content)
}

fn type_radio(transaction_type: TransactionType, label: &str, checked: bool) -> Markup {
    let id = format!("transaction-type-{transaction_type}");

    html! {
        div class="flex items-center gap-3"
        {
            input
                name="type"
                id=(id)
                type="radio"
                value=(transaction_type)
                checked[checked]
                required
                tabindex="0"
                class=(FORM_RADIO_INPUT_STYLE);

            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (label) }
        }
    }
}

fn transaction_form_view(
    action: TransactionFormAction<'_>,
    choices: &TransactionFormChoices<'_>,
    values: &TransactionFormData,
) -> Markup {
    let (hx_post, hx_put, button_text) = match action {
        TransactionFormAction::Create { endpoint } => (Some(endpoint), None, "Create Transaction"),
        TransactionFormAction::Update { endpoint } => (None, Some(endpoint), "Update Transaction"),
    };
    // New transactions start as a debit.
    let is_credit = values.transaction_type == TransactionType::Credit.as_str();

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Transaction type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    (type_radio(TransactionType::Debit, "Debit", !is_credit))
                    (type_radio(TransactionType::Credit, "Credit", is_credit))
                }
            }

            div
            {
                label for="user_id" class=(FORM_LABEL_STYLE) { "User" }

                select name="user_id" id="user_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Select a user" }

                    @for user in choices.users {
                        @let value = user.id.to_string();
                        option value=(value) selected[value == values.user_id] { (user.full_name) }
                    }
                }
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category_id" id="category_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Select a category" }

                    @for category in choices.categories {
                        @let value = category.id.to_string();
                        option value=(value) selected[value == values.category_id] { (category.name) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    max=(MAX_AMOUNT)
                    placeholder="0.01"
                    value=(values.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="time" class=(FORM_LABEL_STYLE) { "Time (UTC), leave empty for now" }

                input
                    name="time"
                    id="time"
                    type="datetime-local"
                    value=(values.time)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (button_text) }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        category::{Category, CategoryName},
        test_utils::{assert_form_select, assert_radio_checked, must_get_form},
        transaction::TransactionFormData,
        user::{Email, FullName, User},
    };

    use super::{TransactionFormAction, TransactionFormChoices, transaction_form_page};

    fn render(values: &TransactionFormData) -> Html {
        let users = [User {
            id: 1,
            full_name: FullName::new_unchecked("Ada"),
            email: Email::new_unchecked("ada@example.com"),
            balance: Default::default(),
        }];
        let categories = [
            Category {
                id: 4,
                name: CategoryName::new_unchecked("Food"),
            },
            Category {
                id: 5,
                name: CategoryName::new_unchecked("Rent"),
            },
        ];

        let markup = transaction_form_page(
            "Create Transaction",
            "/web/transactions/new",
            TransactionFormAction::Create {
                endpoint: "/web/transactions",
            },
            &TransactionFormChoices {
                users: &users,
                categories: &categories,
            },
            values,
        );

        Html::parse_document(&markup.into_string())
    }

    #[test]
    fn empty_form_defaults_to_debit_with_nothing_selected() {
        let html = render(&TransactionFormData::default());
        let form = must_get_form(&html);

        assert_radio_checked(&form, "type", "debit");
        assert_form_select(&form, "user_id", &[("1", "Ada")], None);
        assert_form_select(&form, "category_id", &[("4", "Food"), ("5", "Rent")], None);
    }

    #[test]
    fn values_are_preselected() {
        let html = render(&TransactionFormData {
            user_id: "1".to_owned(),
            category_id: "5".to_owned(),
            transaction_type: "credit".to_owned(),
            amount: "3.50".to_owned(),
            time: "2024-01-01T08:00".to_owned(),
        });
        let form = must_get_form(&html);

        assert_radio_checked(&form, "type", "credit");
        assert_form_select(&form, "user_id", &[("1", "Ada")], Some("1"));
        assert_form_select(&form, "category_id", &[("4", "Food"), ("5", "Rent")], Some("5"));
    }

    #[test]
    fn amount_input_is_bounded() {
        let html = render(&TransactionFormData::default());
        let form = must_get_form(&html);
        let selector = Selector::parse("input[name=amount]").unwrap();
        let input = form.select(&selector).next().expect("No amount input found");

        assert_eq!(input.value().attr("min"), Some("0.01"));
        assert_eq!(input.value().attr("max"), Some("1000000000000000"));
    }
}
