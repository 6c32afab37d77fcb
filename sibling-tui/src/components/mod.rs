pub mod error_bar;
pub mod footer;
pub mod search_bar;
pub mod sibling_list;
