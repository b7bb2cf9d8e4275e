use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).unwrap();

    form.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""))
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = must_get_input(form, name);
    let input_type = input.value().attr("type").unwrap_or_default();

    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    assert_form_input(form, name, type_);

    let input_value = must_get_input(form, name)
        .value()
        .attr("value")
        .unwrap_or_default();

    assert_eq!(
        input_value, value,
        "want input {name} with value \"{value}\", got {input_value:?}"
    );
}

/// Assert that the radio button with `name` and `value` is the checked one.
#[track_caller]
pub(crate) fn assert_radio_checked(form: &ElementRef<'_>, name: &str, value: &str) {
    let selector = Selector::parse(&format!("input[type=radio][name=\"{name}\"]")).unwrap();
    let checked: Vec<_> = form
        .select(&selector)
        .filter(|radio| radio.value().attr("checked").is_some())
        .map(|radio| radio.value().attr("value").unwrap_or_default())
        .collect();

    assert_eq!(checked, vec![value], "want radio {name}={value} checked");
}

/// Assert that the select `name` offers `options` (as `(value, text)`) and has `selected` selected.
#[track_caller]
pub(crate) fn assert_form_select(
    form: &ElementRef<'_>,
    name: &str,
    options: &[(&str, &str)],
    selected: Option<&str>,
) {
    let select = form
        .select(&Selector::parse(&format!("select[name=\"{name}\"]")).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));
    let option_selector = Selector::parse("option").unwrap();

    let got_options: Vec<_> = select
        .select(&option_selector)
        .filter(|option| !option.value().attr("value").unwrap_or_default().is_empty())
        .map(|option| {
            (
                option.value().attr("value").unwrap_or_default().to_owned(),
                option.text().collect::<String>().trim().to_owned(),
            )
        })
        .collect();
    let want_options: Vec<_> = options
        .iter()
        .map(|(value, text)| (value.to_string(), text.to_string()))
        .collect();
    assert_eq!(got_options, want_options, "options of select {name}");

    let got_selected = select
        .select(&option_selector)
        .find(|option| option.value().attr("selected").is_some())
        .and_then(|option| option.value().attr("value"));
    assert_eq!(got_selected, selected, "selected option of select {name}");
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<String>();
    assert_eq!(text, got_text.trim());
}
