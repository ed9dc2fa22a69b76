pub mod example01_guestbook;
pub mod example02_custom_serializer;
pub mod example03_aliases_and_selection;
