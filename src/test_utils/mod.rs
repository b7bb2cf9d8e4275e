#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod response;
pub(crate) mod server;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_select,
    assert_form_submit_button_with_text, assert_hx_endpoint, assert_radio_checked, must_get_form,
};
pub(crate) use response::{
    assert_content_type, assert_hx_redirect, assert_valid_html, get_header, parse_html_document,
    parse_html_fragment, select_text,
};
pub(crate) use server::{get_test_server, get_test_state};
