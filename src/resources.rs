pub const TEMPLATE_GEN_YAML: &str = include_str!("../resources/template_gen.yaml");
pub const BOARD_TABLE_YAML: &str = include_str!("../resources/board_table.yaml");
