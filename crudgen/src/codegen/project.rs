//! Project emitter - renders every file of a generated project in memory

use tracing::debug;

use crate::error::Result;
use crate::request::ConnectionParams;

use super::descriptor::render_descriptor;
use super::naming::{field_columns, validate_columns, TableName};
use super::templates::{
    render_file, EnvTemplate, ReadmeTemplate, RequirementsTemplate, ServiceTemplate,
};

/// Path of the service source inside the project
pub const SERVICE_FILE: &str = "app.py";
/// Path of the API descriptor inside the project
pub const DESCRIPTOR_FILE: &str = "static/swagger.json";

/// One rendered file, addressed relative to the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path using `/` separators (e.g. `static/swagger.json`)
    pub path: &'static str,
    pub contents: String,
}

/// A fully rendered project, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProject {
    /// Directory (and archive base) name, e.g. `Backend_Users`
    pub name: String,
    pub files: Vec<GeneratedFile>,
}

impl RenderedProject {
    /// Look up a rendered file by its relative path
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Archive file name, e.g. `Backend_Users.zip`
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.name)
    }
}

/// Render all project files for `table` with the given ordered columns
///
/// Output depends only on the arguments: the same inputs always give
/// byte-identical files.
pub fn render_project(
    connection: &ConnectionParams,
    table: &TableName,
    columns: &[String],
) -> Result<RenderedProject> {
    validate_columns(table, columns)?;

    let name = table.project_name();
    let class_name = table.class_name();
    let fields = field_columns(columns);
    debug!(
        "Rendering {} ({} columns, {} fields)",
        name,
        columns.len(),
        fields.len()
    );

    let env = render_file(&EnvTemplate { connection })?;
    let service = render_file(&ServiceTemplate {
        table: table.as_str(),
        class_name: &class_name,
        columns,
        fields: &fields,
    })?;
    let descriptor = render_descriptor(table)?;
    let requirements = render_file(&RequirementsTemplate)?;
    let readme = render_file(&ReadmeTemplate {
        project_name: &name,
        table: table.as_str(),
    })?;

    Ok(RenderedProject {
        name,
        files: vec![
            GeneratedFile { path: ".env", contents: env },
            GeneratedFile { path: SERVICE_FILE, contents: service },
            GeneratedFile { path: DESCRIPTOR_FILE, contents: descriptor },
            GeneratedFile { path: "requirements.txt", contents: requirements },
            GeneratedFile { path: "README.md", contents: readme },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrudgenError;

    fn connection() -> ConnectionParams {
        ConnectionParams {
            host: "h".into(),
            database: "d".into(),
            port: 3306,
            user: "u".into(),
            password: "p".into(),
        }
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn render_users() -> RenderedProject {
        let table = TableName::parse("users").unwrap();
        render_project(&connection(), &table, &columns(&["id", "name", "email"])).unwrap()
    }

    #[test]
    fn test_project_layout() {
        let project = render_users();
        assert_eq!(project.name, "Backend_Users");
        assert_eq!(project.archive_name(), "Backend_Users.zip");
        let paths: Vec<&str> = project.files.iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![".env", "app.py", "static/swagger.json", "requirements.txt", "README.md"]
        );
    }

    #[test]
    fn test_env_file() {
        let project = render_users();
        let env = &project.file(".env").unwrap().contents;
        assert_eq!(
            env,
            "DB_HOST=h\nDB_DATABASE=d\nDB_PORT=3306\nDB_USER=u\nDB_PASSWORD=p\n"
        );
    }

    #[test]
    fn test_model_fields_are_non_id_columns_in_order() {
        let project = render_users();
        let app = &project.file(SERVICE_FILE).unwrap().contents;

        assert!(app.contains("class Users(db.Model):"));
        assert!(app.contains("__tablename__ = 'users'"));
        assert!(app.contains("    id = db.Column(db.Integer, primary_key=True)\n    name = db.Column(db.String(255))\n    email = db.Column(db.String(255))\n"));
        assert!(!app.contains("id = db.Column(db.String(255))"));

        let name = app.find("    name = db.Column").unwrap();
        let email = app.find("    email = db.Column").unwrap();
        assert!(name < email);
    }

    #[test]
    fn test_create_and_update_touch_only_fields() {
        let project = render_users();
        let app = &project.file(SERVICE_FILE).unwrap().contents;

        assert!(app.contains("    new_item.name = data.get(\"name\")\n    new_item.email = data.get(\"email\")\n"));
        assert!(app.contains("    item.name = data.get(\"name\")\n    item.email = data.get(\"email\")\n"));
        assert!(!app.contains("new_item.id ="));
        assert!(!app.contains("item.id ="));
    }

    #[test]
    fn test_serialize_includes_every_column() {
        let project = render_users();
        let app = &project.file(SERVICE_FILE).unwrap().contents;
        assert!(app.contains(
            "return { \"id\": self.id, \"name\": self.name, \"email\": self.email }"
        ));
    }

    #[test]
    fn test_routes() {
        let project = render_users();
        let app = &project.file(SERVICE_FILE).unwrap().contents;
        assert!(app.contains("@app.route('/users/', methods=['GET'])"));
        assert!(app.contains("@app.route('/users/<int:id>', methods=['GET'])"));
        assert!(app.contains("@app.route('/users/', methods=['POST'])"));
        assert!(app.contains("@app.route('/users/<int:id>', methods=['PUT'])"));
        assert!(app.contains("@app.route('/users/<int:id>', methods=['DELETE'])"));
        assert!(app.contains("SWAGGER_URL = '/docs'"));
        assert!(app.contains("API_URL = '/static/swagger.json'"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        assert_eq!(render_users(), render_users());
    }

    #[test]
    fn test_static_manifest_and_readme() {
        let project = render_users();
        assert_eq!(
            project.file("requirements.txt").unwrap().contents,
            "Flask\nFlask-SQLAlchemy\nflask-swagger-ui\npython-dotenv\npymysql\nflask-cors\n"
        );
        let readme = &project.file("README.md").unwrap().contents;
        assert!(readme.contains("# Backend_Users"));
        assert!(readme.contains("`users`"));
        assert!(readme.contains("pip install -r requirements.txt"));
    }

    #[test]
    fn test_table_without_id_column() {
        let table = TableName::parse("tags").unwrap();
        let project = render_project(&connection(), &table, &columns(&["label"])).unwrap();
        let app = &project.file(SERVICE_FILE).unwrap().contents;
        assert!(app.contains("    label = db.Column(db.String(255))"));
        assert!(app.contains("return { \"label\": self.label }"));
    }

    #[test]
    fn test_rejects_unsafe_column() {
        let table = TableName::parse("users").unwrap();
        let result = render_project(&connection(), &table, &columns(&["id", "x = 1; import os"]));
        assert!(matches!(result, Err(CrudgenError::UnsupportedColumn(_))));
    }
}
