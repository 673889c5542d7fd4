//! Swagger 2.0 descriptor served by the generated project at `/static/swagger.json`

use serde_json::{json, Value};

use super::naming::TableName;

fn id_parameter() -> Value {
    json!([{ "name": "id", "in": "path", "required": true, "type": "integer" }])
}

/// Build the descriptor for the five CRUD operations over `table`
pub fn build_descriptor(table: &TableName) -> Value {
    let collection = format!("/{}/", table);
    let item = format!("/{}/{{id}}", table);

    let mut paths = serde_json::Map::new();
    paths.insert(
        collection,
        json!({
            "get": { "summary": "Listar todos", "responses": { "200": { "description": "Success" } } },
            "post": { "summary": "Criar novo", "responses": { "201": { "description": "Created" } } }
        }),
    );
    paths.insert(
        item,
        json!({
            "get": {
                "summary": "Buscar por ID",
                "parameters": id_parameter(),
                "responses": { "200": { "description": "Success" } }
            },
            "put": {
                "summary": "Atualizar",
                "parameters": id_parameter(),
                "responses": { "200": { "description": "Updated" } }
            },
            "delete": {
                "summary": "Deletar",
                "parameters": id_parameter(),
                "responses": { "204": { "description": "Deleted" } }
            }
        }),
    );

    json!({
        "swagger": "2.0",
        "info": { "title": format!("API {}", table.class_name()), "version": "1.0" },
        "basePath": "/",
        "paths": paths,
    })
}

/// Pretty-printed (two-space) descriptor text
pub fn render_descriptor(table: &TableName) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build_descriptor(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_paths() {
        let table = TableName::parse("users").unwrap();
        let doc = build_descriptor(&table);

        assert_eq!(doc["swagger"], "2.0");
        assert_eq!(doc["info"]["title"], "API Users");
        assert!(doc["paths"]["/users/"]["get"].is_object());
        assert!(doc["paths"]["/users/"]["post"]["responses"]["201"].is_object());
        assert_eq!(
            doc["paths"]["/users/{id}"]["delete"]["parameters"][0]["type"],
            "integer"
        );
        assert!(doc["paths"]["/users/{id}"]["put"]["parameters"][0]["required"]
            .as_bool()
            .unwrap());
    }

    #[test]
    fn test_descriptor_keeps_key_order() {
        let table = TableName::parse("users").unwrap();
        let text = render_descriptor(&table).unwrap();
        let swagger = text.find("\"swagger\"").unwrap();
        let info = text.find("\"info\"").unwrap();
        let paths = text.find("\"paths\"").unwrap();
        assert!(swagger < info && info < paths);
        assert!(text.starts_with("{\n  \"swagger\": \"2.0\""));
    }
}
