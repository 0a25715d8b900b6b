/*!
 * End-to-end runs of the interactive app with scripted answers
 */

mod common;

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::tempdir;

use common::{app, setup_project, state_path, Answer, ScriptedPrompter};
use project_prompt::{Language, RunOutcome, SelectionRecord, SelectionStore};

fn stored(dir: &std::path::Path) -> SelectionRecord {
    SelectionStore::new(state_path(dir)).load()
}

#[test]
fn test_first_run_selects_and_persists() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("English"),
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec!["a.js"]),
    ]);
    let mut out = Vec::new();
    let outcome = app(temp.path(), &root).run(&mut prompter, &mut out)?;

    let RunOutcome::Written { path, report } = outcome else {
        panic!("expected a written snapshot");
    };
    assert!(prompter.finished());
    assert_eq!(path, root.join("prompt.txt"));
    assert_eq!(report.file_details.len(), 1);
    // a.js, sub/b.py, package-lock.json, .env
    assert_eq!(report.files_discovered, 4);

    let artifact = fs::read_to_string(&path)?;
    assert!(artifact.starts_with("Project structure:\n+ sub\n  - b.py\n"));
    assert!(artifact.contains("\n==== a.js ====\nconsole.log('a');\n"));
    assert!(!artifact.contains("==== sub/b.py ===="));
    assert!(!artifact.contains("node_modules"));

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains(&artifact));
    assert!(printed.contains("Prompt saved to"));

    let record = stored(temp.path());
    assert_eq!(record.language, Some(Language::En));
    assert_eq!(record.root, Some(root.clone()));
    assert_eq!(record.files, vec![root.join("a.js")]);
    Ok(())
}

#[test]
fn test_second_run_reuses_previous_selection() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;
    SelectionStore::new(state_path(temp.path())).save(&SelectionRecord {
        language: Some(Language::En),
        root: Some(root.clone()),
        files: vec![root.join("sub").join("b.py"), root.join("a.js")],
    })?;

    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick("Yes")]);
    let mut out = Vec::new();
    let outcome = app(temp.path(), temp.path()).run(&mut prompter, &mut out)?;

    assert!(matches!(outcome, RunOutcome::Written { .. }));
    assert!(prompter.questions[0].contains(&root.display().to_string()));

    let artifact = fs::read_to_string(root.join("prompt.txt"))?;
    let b = artifact.find("==== sub/b.py ====").unwrap();
    let a = artifact.find("==== a.js ====").unwrap();
    assert!(b < a, "files keep their stored order");
    Ok(())
}

#[test]
fn test_declined_reuse_starts_walk_at_stored_root() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;
    SelectionStore::new(state_path(temp.path())).save(&SelectionRecord {
        language: Some(Language::En),
        root: Some(root.clone()),
        files: vec![root.join("a.js")],
    })?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("No"),
        Answer::Pick("sub"),
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec!["b.py"]),
    ]);
    let outcome = app(temp.path(), temp.path()).run(&mut prompter, &mut Vec::new())?;

    assert!(matches!(outcome, RunOutcome::Written { .. }));
    let sub = root.join("sub");
    assert!(prompter.questions[1].ends_with(&root.display().to_string()));
    assert!(fs::read_to_string(sub.join("prompt.txt"))?.contains("==== b.py ===="));
    assert_eq!(stored(temp.path()).root, Some(sub));
    Ok(())
}

#[test]
fn test_stale_root_suggests_nearest_ancestor() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;
    let stale = root.join("removed").join("deeper");
    SelectionStore::new(state_path(temp.path())).save(&SelectionRecord {
        language: Some(Language::En),
        root: Some(stale.clone()),
        files: vec![stale.join("a.js")],
    })?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec!["[Select all files]"]),
    ]);
    let mut out = Vec::new();
    app(temp.path(), temp.path()).run(&mut prompter, &mut out)?;

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains(&format!("Saved folder {} no longer exists", stale.display())));
    assert!(prompter.questions[0].ends_with(&root.display().to_string()));
    assert!(root.join("prompt.txt").exists());
    assert_eq!(stored(temp.path()).root, Some(root));
    Ok(())
}

#[test]
fn test_select_all_skips_bulk_excluded_files() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("English"),
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec!["[Select all files]"]),
    ]);
    app(temp.path(), &root).run(&mut prompter, &mut Vec::new())?;

    let mut files = stored(temp.path()).files;
    files.sort();
    let mut expected: Vec<PathBuf> = vec![root.join("a.js"), root.join("sub").join("b.py")];
    expected.sort();
    assert_eq!(files, expected);

    let artifact = fs::read_to_string(root.join("prompt.txt"))?;
    assert!(!artifact.contains("SECRET"));
    // Still part of the tree
    assert!(artifact.contains("- package-lock.json\n"));
    Ok(())
}

#[test]
fn test_stale_files_are_dropped_and_persisted() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;
    let gone = root.join("gone.js");
    SelectionStore::new(state_path(temp.path())).save(&SelectionRecord {
        language: Some(Language::En),
        root: Some(root.clone()),
        files: vec![root.join("a.js"), gone, root.join("sub").join("b.py")],
    })?;

    let mut prompter = ScriptedPrompter::new(vec![Answer::Pick("Yes")]);
    let mut out = Vec::new();
    app(temp.path(), temp.path()).run(&mut prompter, &mut out)?;

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("1 previously selected file(s) no longer exist"));
    assert_eq!(
        stored(temp.path()).files,
        vec![root.join("a.js"), root.join("sub").join("b.py")]
    );
    assert!(!fs::read_to_string(root.join("prompt.txt"))?.contains("gone.js ===="));
    Ok(())
}

#[test]
fn test_no_surviving_files_forces_reselection_at_same_root() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;
    SelectionStore::new(state_path(temp.path())).save(&SelectionRecord {
        language: Some(Language::En),
        root: Some(root.clone()),
        files: vec![root.join("gone.js")],
    })?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec!["a.js"]),
    ]);
    let mut out = Vec::new();
    app(temp.path(), temp.path()).run(&mut prompter, &mut out)?;

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("None of the previously selected files exist anymore"));
    assert!(prompter.questions[0].ends_with(&root.display().to_string()));
    assert_eq!(stored(temp.path()).files, vec![root.join("a.js")]);
    Ok(())
}

#[test]
fn test_cancel_writes_nothing() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("English"),
        Answer::Pick("[Select this folder]"),
        Answer::Cancel,
    ]);
    let outcome = app(temp.path(), &root).run(&mut prompter, &mut Vec::new())?;

    assert!(matches!(outcome, RunOutcome::Cancelled));
    assert!(!root.join("prompt.txt").exists());
    // Only the language choice made it to disk
    let record = stored(temp.path());
    assert_eq!(record.language, Some(Language::En));
    assert_eq!(record.root, None);
    assert!(record.files.is_empty());
    Ok(())
}

#[test]
fn test_russian_run_uses_russian_labels() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("Русский"),
        Answer::Pick("[Выбрать эту папку]"),
        Answer::Tick(vec!["a.js"]),
    ]);
    app(temp.path(), &root).run(&mut prompter, &mut Vec::new())?;

    let artifact = fs::read_to_string(root.join("prompt.txt"))?;
    assert!(artifact.starts_with("Структура проекта:\n"));
    assert!(artifact.contains("Содержимое выбранных файлов:\n"));
    assert_eq!(stored(temp.path()).language, Some(Language::Ru));
    Ok(())
}

#[test]
fn test_navigation_goes_up_and_down() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("English"),
        Answer::Pick("[..] Go up"),
        Answer::Pick("[..] Go up"),
        Answer::Pick("project"),
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec![]),
    ]);
    let outcome = app(temp.path(), &root.join("sub")).run(&mut prompter, &mut Vec::new())?;

    assert!(matches!(outcome, RunOutcome::Written { .. }));
    assert!(root.join("prompt.txt").exists());
    assert!(prompter.finished());
    Ok(())
}

#[test]
fn test_previous_artifact_is_not_rescanned() -> io::Result<()> {
    let temp = tempdir()?;
    let root = setup_project(temp.path())?;
    fs::write(root.join("prompt.txt"), "old snapshot\n")?;
    fs::write(root.join("sub").join("prompt.txt"), "nested notes\n")?;

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Pick("English"),
        Answer::Pick("[Select this folder]"),
        Answer::Tick(vec!["[Select all files]"]),
    ]);
    app(temp.path(), &root).run(&mut prompter, &mut Vec::new())?;

    let artifact = fs::read_to_string(root.join("prompt.txt"))?;
    assert!(!artifact.contains("old snapshot"));
    assert!(artifact.contains("==== sub/prompt.txt ====\nnested notes\n"));
    Ok(())
}
