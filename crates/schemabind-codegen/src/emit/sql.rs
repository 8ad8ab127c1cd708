//! MySQL DDL: soft-deletion views, foreign keys and indexes

use crate::error::{GenerateError, GenerateResult};
use crate::memo::EmissionMemo;
use crate::model::{TypeModel, TypeModelNode};
use schemabind_core::{Category, FieldDescriptor, TypeDescriptor};
use std::collections::HashSet;

/// Table that stores rows of `descriptor`
///
/// Extended objects are projections; their rows live in the companion table.
pub fn storage_table(descriptor: &TypeDescriptor) -> &str {
    descriptor
        .extended_object
        .as_ref()
        .map(|eo| eo.companion.as_str())
        .unwrap_or(descriptor.name.as_str())
}

fn columns(node: &TypeModelNode) -> impl Iterator<Item = &FieldDescriptor> {
    node.all_visible_fields().into_iter().filter(|f| f.column)
}

/// One `CREATE VIEW` statement, or `None` when the type opts out
pub fn view_statement(node: &TypeModelNode, schema: &str) -> GenerateResult<Option<String>> {
    let Some(extended) = node.descriptor().extended_object.as_ref() else {
        return Ok(None);
    };
    if node.category() != Category::PersistedEntity {
        return Err(GenerateError::invalid_tagging(
            node.qualified_name(),
            "tagged extended object but not a persisted entity",
        ));
    }
    if !extended.need_view {
        return Ok(None);
    }

    let cols: Vec<&str> = columns(node).map(|f| f.name.as_str()).collect();
    Ok(Some(format!(
        "\nCREATE VIEW `{schema}`.`{}` AS SELECT {} FROM `{schema}`.`{}` WHERE {} IS NULL;\n",
        node.name(),
        cols.join(", "),
        extended.companion,
        extended.soft_deleted_column
    )))
}

/// Contents of `view.sql`
///
/// Fails on the first mistagged type; nothing is returned to write.
pub fn render_views(model: &TypeModel, schema: &str) -> GenerateResult<String> {
    let mut out = String::new();
    for node in model.iter() {
        if let Some(statement) = view_statement(node, schema)? {
            tracing::debug!(type_name = node.name(), "rendered view");
            out.push_str(&statement);
        }
    }
    Ok(out)
}

/// Contents of `foreignKeys.sql`
///
/// `table_of` maps an entity name to its storage table. Constraints are keyed
/// by table and column in `memo`, so an entity and its companion declaring the
/// same key produce one statement.
pub fn render_foreign_keys(
    model: &TypeModel,
    schema: &str,
    memo: &mut EmissionMemo,
    table_of: &dyn Fn(&str) -> Option<String>,
) -> GenerateResult<String> {
    let mut out = String::new();
    let mut names = HashSet::new();

    for node in model.iter() {
        let table = storage_table(node.descriptor());
        for field in columns(node) {
            let Some(fk) = field.foreign_key.as_ref() else {
                continue;
            };
            if !memo.mark_emitted(&format!("fk:{table}.{}", field.name)) {
                continue;
            }
            let parent_table = table_of(&fk.parent_entity).ok_or_else(|| {
                GenerateError::invalid_tagging(
                    node.qualified_name(),
                    format!(
                        "foreign key '{}' references unknown entity {}",
                        field.name, fk.parent_entity
                    ),
                )
            })?;

            let mut constraint = format!("fk{table}{parent_table}");
            if !names.insert(constraint.clone()) {
                constraint = format!("{constraint}_{}", field.name);
                names.insert(constraint.clone());
            }

            out.push_str(&format!(
                "ALTER TABLE `{schema}`.`{table}` ADD CONSTRAINT {constraint} FOREIGN KEY (`{}`) \
                 REFERENCES `{schema}`.`{parent_table}` (`{}`) ON UPDATE {} ON DELETE {};\n",
                field.name,
                fk.parent_key,
                fk.on_update.as_sql(),
                fk.on_delete.as_sql()
            ));
        }
    }
    Ok(out)
}

/// Contents of `indexes.sql`
pub fn render_indexes(model: &TypeModel, schema: &str, memo: &mut EmissionMemo) -> String {
    let mut out = String::new();
    for node in model.iter() {
        let table = storage_table(node.descriptor());
        for field in columns(node).filter(|f| f.index) {
            let index = format!("idx{table}{}", field.name);
            if !memo.mark_emitted(&index) {
                continue;
            }
            out.push_str(&format!(
                "CREATE INDEX `{index}` ON `{schema}`.`{table}` (`{}`);\n",
                field.name
            ));
        }
    }
    out
}
