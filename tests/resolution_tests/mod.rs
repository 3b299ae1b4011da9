pub mod test_utils;

pub mod fault_containment;
pub mod identifier_names;
pub mod literal_names;
pub mod table_names;
