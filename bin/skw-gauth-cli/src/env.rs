use crate::table::TableStyle;

pub struct EnvironmentVar {
    pub table_style: TableStyle,
}

impl EnvironmentVar {
    /// Reads the process environment, after `.env` has been loaded.
    pub fn load() -> Self {
        let table_style = dotenv::var("GOOGAUTH_STYLE")
            .map(|style| TableStyle::from(style.as_str()))
            .unwrap_or_default();

        Self { table_style }
    }
}
