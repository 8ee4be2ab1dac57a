pub mod comparer;

pub mod couple_view;
pub mod sorted_couple_view;
pub mod freezed_couple_view;
pub mod single_view;
pub mod filterless_view;

pub mod notify_view;
pub mod list_adapter;

pub mod vec2json;
