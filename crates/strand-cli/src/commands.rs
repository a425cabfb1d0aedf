//! CLI command implementations.

use crate::EntityArgs;
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::Path;
use strand_core::{
    by_tag, check_image, favorites_view, paginate, search as search_entities, sort_by_name,
    Attributes, EntityId, FormPayload, Hairstyle, Role,
};
use strand_graph::{
    export_document, load_dataset, parse_import, validate as validate_graph, Catalog, CatalogStore,
    RelationsEditor,
};
use strand_match::{all_matches, best_match, MatchCategory, MatchReport, Weights};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn open(store_path: &Path) -> Result<(CatalogStore, Catalog)> {
    let store = CatalogStore::open(store_path)?;
    let entities = store.load_entities()?;
    let favorites = store.load_favorites()?;
    Ok((store, Catalog::from_parts(entities, favorites)))
}

fn save(store: &CatalogStore, catalog: &Catalog) -> Result<()> {
    store.save_entities(catalog.entities())?;
    store.save_favorites(catalog.favorites())?;
    Ok(())
}

/// Editor resuming the persisted undo/redo history, so structural edits
/// stay undoable across invocations.
fn open_editor(store: &CatalogStore) -> Result<RelationsEditor> {
    let (undo, redo) = store.load_history()?;
    Ok(RelationsEditor::with_history(undo, redo))
}

fn save_editor(store: &CatalogStore, editor: &RelationsEditor) -> Result<()> {
    let (undo, redo) = editor.history();
    store.save_history(undo, redo)?;
    Ok(())
}

/// The render step after a mutation: a one-line summary plus the
/// advisory consistency state.
fn render(catalog: &Catalog) {
    let parents = catalog.entities().iter().filter(|h| h.is_parent()).count();
    let children = catalog.entities().iter().filter(|h| h.is_child()).count();
    println!(
        "  {} entries ({} parents, {} children, {} standalone)",
        catalog.len().to_string().cyan(),
        parents,
        children,
        catalog.len() - parents - children
    );
    match validate_graph(catalog.entities()) {
        Some(violation) => println!("  {} {}", "⚠".yellow(), violation),
        None => println!("  {} graph consistent", "✓".green()),
    }
}

fn entity_line(entity: &Hairstyle, favorite: bool) -> String {
    let glyph = entity.emoji.as_deref().unwrap_or("✂️");
    let star = if favorite { " ★" } else { "" };
    let role = entity
        .role()
        .map(|r| format!(" [{r}]"))
        .unwrap_or_default();
    format!(
        "  {glyph} {} {}{}{}",
        entity.name.cyan(),
        format!("(ID: {})", entity.id).dimmed(),
        role.yellow(),
        star.yellow()
    )
}

/// Seed the store from the static dataset.
pub fn init(store_path: &Path, data: &Path, force: bool) -> Result<()> {
    let store = CatalogStore::open(store_path)?;
    if store.is_initialized()? && !force {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    let seed = load_dataset(data);
    store.save_entities(&seed)?;
    if force {
        store.save_favorites(&[])?;
    }

    println!(
        "{} Initialized store with {} entries from {}",
        "✓".green(),
        seed.len().to_string().cyan(),
        data.display()
    );
    Ok(())
}

/// Show catalog statistics.
pub fn status(store_path: &Path) -> Result<()> {
    let (_, catalog) = open(store_path)?;
    let editor = RelationsEditor::new();

    println!("{}", "Catalog status".cyan());
    render(&catalog);
    println!(
        "  {} favorites, {} unpaired children, {} trees",
        catalog.favorites().len(),
        editor.unpaired_children(&catalog).len(),
        editor.trees(&catalog).len()
    );
    Ok(())
}

/// List entries with browse filters.
pub fn list(
    store_path: &Path,
    tag: Option<&str>,
    query: Option<&str>,
    favorites: bool,
    sort: bool,
    page: Option<usize>,
    per_page: usize,
) -> Result<()> {
    let (_, catalog) = open(store_path)?;

    let mut entries: Vec<&Hairstyle> = if favorites {
        favorites_view(catalog.entities(), catalog.favorites())
    } else {
        catalog.entities().iter().collect()
    };
    if let Some(tag) = tag {
        let tagged: Vec<EntityId> = by_tag(catalog.entities(), tag).iter().map(|h| h.id).collect();
        entries.retain(|h| tagged.contains(&h.id));
    }
    if let Some(query) = query {
        let hits: Vec<EntityId> = search_entities(catalog.entities(), query)
            .iter()
            .map(|h| h.id)
            .collect();
        entries.retain(|h| hits.contains(&h.id));
    }
    if sort {
        let ordered: Vec<EntityId> = sort_by_name(catalog.entities()).iter().map(|h| h.id).collect();
        entries.sort_by_key(|h| ordered.iter().position(|id| *id == h.id));
    }

    if entries.is_empty() {
        println!("No matching entries");
        return Ok(());
    }

    if let Some(page) = page {
        let paged = paginate(&entries, page, per_page);
        for entity in &paged.items {
            println!("{}", entity_line(entity, catalog.is_favorite(entity.id)));
        }
        println!(
            "  {}",
            format!("page {}/{} ({} entries)", paged.current_page, paged.total_pages, paged.total_items).dimmed()
        );
    } else {
        for entity in &entries {
            println!("{}", entity_line(entity, catalog.is_favorite(entity.id)));
        }
    }
    Ok(())
}

/// Show one entry in full.
pub fn show(store_path: &Path, id: EntityId) -> Result<()> {
    let (_, catalog) = open(store_path)?;
    let Some(entity) = catalog.get(id) else {
        return Err(format!("no entry with id {id}").into());
    };

    println!("{}", entity_line(entity, catalog.is_favorite(id)));
    println!("  {}", entity.description);
    if !entity.length.is_empty() {
        println!("  length: {}", entity.length);
    }
    if !entity.style.is_empty() {
        println!("  style: {}", entity.style);
    }
    if !entity.tags.is_empty() {
        println!("  tags: {}", entity.tags.join(" • ").dimmed());
    }
    if let Some(image) = &entity.image {
        println!("  image: {}", image.dimmed());
    }
    if let Some(attrs) = &entity.attributes {
        println!(
            "  attributes: {} / {} / {} / {}",
            attrs.sides, attrs.top, attrs.bangs, attrs.style
        );
    }
    for pid in entity.parent_ids() {
        let name = catalog.get(*pid).map_or("<dangling>", |p| p.name.as_str());
        println!("  parent: {} {}", name, format!("(ID: {pid})").dimmed());
    }
    for cid in entity.children_ids() {
        let name = catalog.get(*cid).map_or("<dangling>", |c| c.name.as_str());
        println!("  child: {} {}", name, format!("(ID: {cid})").dimmed());
    }
    Ok(())
}

fn payload_from_args(args: EntityArgs, existing: Option<&Hairstyle>) -> Result<FormPayload> {
    let image = match args.image {
        Some(path) => {
            let size = fs::metadata(&path)?.len();
            check_image(&media_type(&path), size)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let attributes = merge_attributes(
        existing.and_then(|h| h.attributes),
        args.sides.as_deref(),
        args.top.as_deref(),
        args.bangs.as_deref(),
        args.finish.as_deref(),
    )?;

    let join_ids = |ids: &[EntityId]| {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    };

    Ok(FormPayload {
        name: or_existing(args.name, existing.map(|h| h.name.clone())),
        description: or_existing(args.description, existing.map(|h| h.description.clone())),
        length: or_existing(args.length, existing.map(|h| h.length.clone())),
        style: or_existing(args.style, existing.map(|h| h.style.clone())),
        tags: or_existing(args.tags, existing.map(|h| h.tags.join(", "))),
        emoji: args.emoji.or_else(|| existing.and_then(|h| h.emoji.clone())),
        image: image.or_else(|| existing.and_then(|h| h.image.clone())),
        attributes,
        role: args
            .role
            .map(Role::from)
            .or_else(|| existing.and_then(Hairstyle::role)),
        parent_ids: or_existing(args.parents, existing.map(|h| join_ids(h.parent_ids()))),
        children_ids: or_existing(args.children, existing.map(|h| join_ids(h.children_ids()))),
    })
}

fn or_existing(arg: Option<String>, existing: Option<String>) -> String {
    arg.or(existing).unwrap_or_default()
}

fn merge_attributes(
    existing: Option<Attributes>,
    sides: Option<&str>,
    top: Option<&str>,
    bangs: Option<&str>,
    finish: Option<&str>,
) -> Result<Option<Attributes>> {
    if sides.is_none() && top.is_none() && bangs.is_none() && finish.is_none() {
        return Ok(existing);
    }
    let mut attrs = existing.unwrap_or_default();
    if let Some(sides) = sides {
        attrs.sides = sides.parse()?;
    }
    if let Some(top) = top {
        attrs.top = top.parse()?;
    }
    if let Some(bangs) = bangs {
        attrs.bangs = bangs.parse()?;
    }
    if let Some(finish) = finish {
        attrs.style = finish.parse()?;
    }
    Ok(Some(attrs))
}

fn media_type(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "gif" => "image/gif".to_string(),
        "webp" => "image/webp".to_string(),
        other => format!("image/{other}"),
    }
}

/// Add a new entry from form-style fields.
pub fn add(store_path: &Path, args: EntityArgs) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let draft = payload_from_args(args, None)?.validate()?;

    let id = catalog.create(draft);
    save(&store, &catalog)?;

    println!("{} Added entry {}", "✓".green(), id.to_string().cyan());
    render(&catalog);
    Ok(())
}

/// Edit an entry; omitted fields keep their current values.
pub fn edit(store_path: &Path, id: EntityId, args: EntityArgs) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let Some(existing) = catalog.get(id) else {
        return Err(format!("no entry with id {id}").into());
    };
    let draft = payload_from_args(args, Some(existing))?.validate()?;

    catalog.update(id, draft);
    save(&store, &catalog)?;

    println!("{} Updated entry {}", "✓".green(), id.to_string().cyan());
    render(&catalog);
    Ok(())
}

/// Delete an entry.
pub fn delete(store_path: &Path, id: EntityId) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    if !catalog.remove(id) {
        return Err(format!("no entry with id {id}").into());
    }
    save(&store, &catalog)?;

    println!("{} Deleted entry {}", "✓".green(), id.to_string().cyan());
    render(&catalog);
    Ok(())
}

/// Toggle favorite status.
pub fn favorite(store_path: &Path, id: EntityId) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let now_favorite = catalog.toggle_favorite(id);
    save(&store, &catalog)?;

    if now_favorite {
        println!("{} Entry {} marked favorite", "✓".green(), id);
    } else {
        println!("{} Entry {} unmarked", "✓".green(), id);
    }
    Ok(())
}

/// Run the matcher against the whole catalog.
#[allow(clippy::too_many_arguments)]
pub fn find_match(
    store_path: &Path,
    sides: &str,
    top: &str,
    bangs: &str,
    finish: &str,
    all: bool,
    limit: Option<usize>,
    report: bool,
) -> Result<()> {
    let (_, catalog) = open(store_path)?;
    let criteria = Attributes {
        sides: sides.parse()?,
        top: top.parse()?,
        bangs: bangs.parse()?,
        style: finish.parse()?,
    };
    let weights = Weights::default();

    if all {
        let matches = all_matches(&criteria, catalog.entities(), &weights, limit);
        if matches.is_empty() {
            println!("No candidates in the catalog");
            return Ok(());
        }
        for hit in matches {
            let category = MatchCategory::from_score(hit.score);
            println!(
                "  {:>3}  {}  {}",
                hit.score.to_string().cyan(),
                hit.entity.name,
                category.to_string().dimmed()
            );
        }
        return Ok(());
    }

    let Some(hit) = best_match(&criteria, catalog.entities(), &weights) else {
        println!("No candidates in the catalog");
        return Ok(());
    };
    let category = MatchCategory::from_score(hit.score);
    println!(
        "{} {} {}",
        "Best match:".cyan(),
        hit.entity.name,
        format!("({}%, {})", hit.score, category).dimmed()
    );
    println!("  {}", category.message());

    if report {
        if let Some(report) = MatchReport::build(&criteria, hit.entity, &weights) {
            for diff in &report.differences {
                println!(
                    "  {} {}: wanted {}, has {}",
                    "≠".yellow(),
                    diff.attribute,
                    diff.expected,
                    diff.actual
                );
            }
            if report.differences.is_empty() {
                println!("  {} every attribute matches", "✓".green());
            }
        } else {
            println!("  {} entry has no attributes to compare", "⚠".yellow());
        }
    }
    Ok(())
}

/// Link a child under a parent.
pub fn link(store_path: &Path, child: EntityId, parent: EntityId) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let mut editor = open_editor(&store)?;

    if editor.add_link(&mut catalog, child, parent) {
        save(&store, &catalog)?;
        save_editor(&store, &editor)?;
        println!("{} Linked {} under {}", "✓".green(), child, parent);
        render(&catalog);
    } else {
        println!("{} Nothing to do (check ids and roles)", "⚠".yellow());
    }
    Ok(())
}

/// Detach a child from all parents.
pub fn unlink(store_path: &Path, child: EntityId) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let mut editor = open_editor(&store)?;

    if editor.remove_link(&mut catalog, child) {
        save(&store, &catalog)?;
        save_editor(&store, &editor)?;
        println!("{} Detached {} from all parents", "✓".green(), child);
        render(&catalog);
    } else {
        println!("{} Nothing to do (unknown id)", "⚠".yellow());
    }
    Ok(())
}

/// Detach every child from a parent.
pub fn clear_children(store_path: &Path, parent: EntityId) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let mut editor = open_editor(&store)?;

    if editor.remove_all_children(&mut catalog, parent) {
        save(&store, &catalog)?;
        save_editor(&store, &editor)?;
        println!("{} Cleared children of {}", "✓".green(), parent);
        render(&catalog);
    } else {
        println!("{} Nothing to do (unknown id)", "⚠".yellow());
    }
    Ok(())
}

/// Change an entry's structural role.
pub fn role(store_path: &Path, id: EntityId, role: Role) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let mut editor = open_editor(&store)?;

    if editor.change_role(&mut catalog, id, role) {
        save(&store, &catalog)?;
        save_editor(&store, &editor)?;
        println!("{} Entry {} is now a {}", "✓".green(), id, role);
        render(&catalog);
    } else {
        println!("{} Nothing to do (unknown id or same role)", "⚠".yellow());
    }
    Ok(())
}

/// Revert the most recent structural edit.
pub fn undo(store_path: &Path) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let mut editor = open_editor(&store)?;

    if editor.undo(&mut catalog) {
        save(&store, &catalog)?;
        save_editor(&store, &editor)?;
        println!("{} Reverted the last structural edit", "✓".green());
        render(&catalog);
    } else {
        println!("{} Nothing to undo", "⚠".yellow());
    }
    Ok(())
}

/// Reapply the last undone structural edit.
pub fn redo(store_path: &Path) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let mut editor = open_editor(&store)?;

    if editor.redo(&mut catalog) {
        save(&store, &catalog)?;
        save_editor(&store, &editor)?;
        println!("{} Reapplied the undone edit", "✓".green());
        render(&catalog);
    } else {
        println!("{} Nothing to redo", "⚠".yellow());
    }
    Ok(())
}

/// Report the first consistency violation.
pub fn validate(store_path: &Path) -> Result<()> {
    let (_, catalog) = open(store_path)?;
    match validate_graph(catalog.entities()) {
        Some(violation) => println!("{} {}", "⚠".yellow(), violation),
        None => println!("{} graph consistent", "✓".green()),
    }
    Ok(())
}

/// Export the catalog as a formatted JSON document.
pub fn export(store_path: &Path, output: Option<&Path>) -> Result<()> {
    let (_, catalog) = open(store_path)?;
    let text = export_document(catalog.entities(), Utc::now())?;

    match output {
        Some(path) => {
            fs::write(path, &text)?;
            println!("{} Exported to {}", "✓".green(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Import a previously exported document.
pub fn import(store_path: &Path, input: &Path) -> Result<()> {
    let (store, mut catalog) = open(store_path)?;
    let text = fs::read_to_string(input)?;
    let data = parse_import(&text)?;

    if let Some(entities) = data.hairstyles {
        catalog.replace_entities(entities);
    }
    if let Some(favorites) = data.favorites {
        catalog.replace_favorites(favorites);
    }
    save(&store, &catalog)?;

    println!("{} Imported {}", "✓".green(), input.display());
    render(&catalog);
    Ok(())
}
