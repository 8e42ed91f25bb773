// LinkVault view state
// State machines behind the rendered widgets: input, validation, pending
// flags, user-visible errors. Actual rendering lives in a front end.

pub mod add_form;
pub mod bookmark_row;
