use crate::backend::GeneratedArtifact;
use crate::backend::GeneratedOutput;
use crate::file_reader;
use crate::golden_matcher::GoldenArtifact;
use crate::golden_matcher::GoldenMatchRule;
use crate::golden_matcher::MatchError;
use crate::golden_matcher::MatchResult;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

type Result<T> = std::result::Result<T, MatchError>;

/// Lists every golden file under `golden_dir` (at any depth) with the given
/// extension, ordered by path.
pub fn golden_files(
    case_name: &str,
    golden_dir: &Path,
    extension: &str,
) -> Result<Vec<GoldenArtifact>> {
    let mut goldens = vec![];
    for entry in WalkDir::new(golden_dir).sort_by_file_name() {
        let entry = entry.map_err(|err| MatchError::GoldenWalkError {
            golden_dir: golden_dir.to_path_buf(),
            err,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }

        let relative_path = path
            .strip_prefix(golden_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf());
        goldens.push(GoldenArtifact {
            case_name: case_name.to_string(),
            relative_path,
            path: path.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    Ok(goldens)
}

/// Derives the generated file's stem from a golden file name:
/// `ExpectedHero.java` becomes `Hero`.
///
/// Only the file name is used; the golden file's own subdirectory plays no
/// part in resolving it (see [`resolve_generated_file`]).
pub fn generated_file_stem(golden_file_name: &str, rule: &GoldenMatchRule) -> String {
    let unmarked = golden_file_name.replace(rule.expected_marker.as_str(), "");
    let suffix = format!(".{}", rule.extension);
    match unmarked.strip_suffix(suffix.as_str()) {
        Some(stem) => stem.to_string(),
        None => unmarked,
    }
}

/// The ordered list of places a generated file named `<stem>.<extension>`
/// may live in.
pub fn candidate_paths(package_dir: &Path, stem: &str, rule: &GoldenMatchRule) -> Vec<PathBuf> {
    let file_name = format!("{stem}.{}", rule.extension);
    rule.search_subdirs
        .iter()
        .map(|subdir| {
            if subdir.is_empty() {
                package_dir.join(&file_name)
            } else {
                package_dir.join(subdir).join(&file_name)
            }
        })
        .collect()
}

/// Finds the generated counterpart of `golden`: the first of the
/// [`candidate_paths`] that is a file.
pub fn resolve_generated_file(
    package_dir: &Path,
    golden: &GoldenArtifact,
    rule: &GoldenMatchRule,
) -> Result<PathBuf> {
    let golden_file_name = golden.path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = generated_file_stem(&golden_file_name, rule);
    let candidates = candidate_paths(package_dir, &stem, rule);

    match candidates.iter().find(|candidate| candidate.is_file()) {
        Some(found) => Ok(found.to_owned()),
        None => Err(MatchError::GeneratedFileNotFound {
            golden_file: golden.path.to_owned(),
            file_name: format!("{stem}.{}", rule.extension),
            candidates,
        }),
    }
}

/// Compares a golden file and a generated file as text, exactly.
pub fn compare_contents(golden_file: &Path, generated_file: &Path) -> Result<()> {
    let expected = file_reader::read_content(golden_file)?;
    let actual = file_reader::read_content(generated_file)?;
    if expected == actual {
        Ok(())
    } else {
        Err(MatchError::ContentMismatch {
            golden_file: golden_file.to_path_buf(),
            generated_file: generated_file.to_path_buf(),
            expected,
            actual,
        })
    }
}

/// Checks every golden file of one backend for a case.
///
/// Returns one [`MatchResult`] per golden file. Only a failure to enumerate
/// the golden directory itself is returned as an `Err`; an unresolvable or
/// differing golden file is a failed `MatchResult`.
pub fn match_golden_files(
    case_name: &str,
    golden_dir: &Path,
    generated: &GeneratedOutput,
    rule: &GoldenMatchRule,
) -> Result<Vec<MatchResult>> {
    let goldens = golden_files(case_name, golden_dir, &rule.extension)?;
    log::debug!(
        "Matching {} `.{}` golden files for case `{case_name}` against the \
        `{}` backend output...",
        goldens.len(),
        rule.extension,
        generated.backend,
    );

    let results = goldens
        .into_iter()
        .map(|golden| {
            let resolved = resolve_generated_file(&generated.package_dir, &golden, rule);
            match resolved {
                Ok(generated_path) => {
                    log::trace!("{:#?} resolved to {generated_path:#?}.", golden.relative_path);
                    let outcome = compare_contents(&golden.path, &generated_path);
                    let relative_path = generated_path
                        .strip_prefix(&generated.output_root)
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|_| generated_path.clone());
                    MatchResult {
                        golden,
                        generated: Some(GeneratedArtifact {
                            backend: generated.backend.to_owned(),
                            relative_path,
                            path: generated_path,
                        }),
                        outcome,
                    }
                },

                Err(err) => MatchResult {
                    golden,
                    generated: None,
                    outcome: Err(err),
                },
            }
        })
        .collect();

    Ok(results)
}
