pub mod multi_select;
pub mod pagination_controls;
pub mod side_panel;
pub mod table;
