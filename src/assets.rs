//! The three asset pipelines, as step lists.
//!
//! ```text
//! logo         clean *.png *.svg → convert png → convert svg → link full → resize small, tiny
//! schemes      clean *.png → for each scheme: convert with scheme → resize in place
//! screenshots  remove svg.png → capture <svg> → resize in place → remove png.png → resize reference
//! ```
//!
//! Builders are pure: they only join paths. Nothing touches the filesystem
//! until the list reaches [`run_with_backend`](crate::pipeline::run_with_backend).

use crate::config::AssetsConfig;
use crate::imaging::{CaptureParams, ConvertParams, ConverterKind, ResizeParams};
use crate::pipeline::Pipeline;
use crate::steps::Step;
use clap::ValueEnum;
use std::path::Path;
use std::time::Duration;

/// Selects which pipelines a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Logo,
    Schemes,
    Screenshots,
    All,
}

/// Pipelines for `target`, in the order they run.
pub fn pipelines_for(target: Target, config: &AssetsConfig, root: &Path) -> Vec<Pipeline> {
    match target {
        Target::Logo => vec![logo(config, root)],
        Target::Schemes => vec![schemes(config, root)],
        Target::Screenshots => vec![screenshots(config, root)],
        Target::All => vec![
            logo(config, root),
            schemes(config, root),
            screenshots(config, root),
        ],
    }
}

/// Logo: primary raster and vector renders, a `full` alias, downscaled copies.
pub fn logo(config: &AssetsConfig, root: &Path) -> Pipeline {
    let logo = &config.logo;
    let dir = root.join(&logo.dir);
    let source = dir.join(&logo.source);
    let primary_png = format!("{}.png", logo.primary);
    let primary = dir.join(&primary_png);

    let mut steps = vec![
        Step::Clean {
            dir: dir.clone(),
            extensions: logo.extensions.clone(),
        },
        Step::Convert(ConvertParams {
            kind: ConverterKind::Png,
            source: source.clone(),
            scheme: None,
            output: primary.clone(),
        }),
        Step::Convert(ConvertParams {
            kind: ConverterKind::Svg,
            source,
            scheme: None,
            output: dir.join(format!("{}.svg", logo.primary)),
        }),
        Step::Alias {
            target: primary_png,
            link: dir.join(format!("{}.png", logo.alias)),
        },
    ];
    steps.extend(logo.sizes.iter().map(|size| {
        Step::Resize(ResizeParams {
            source: primary.clone(),
            output: dir.join(format!("{}.png", size.name)),
            percent: size.percent,
        })
    }));

    Pipeline::new("logo", steps)
}

/// Scheme swatches: one render per scheme, each shrunk in place.
pub fn schemes(config: &AssetsConfig, root: &Path) -> Pipeline {
    let schemes = &config.schemes;
    let dir = root.join(&schemes.dir);

    let mut steps = vec![Step::Clean {
        dir: dir.clone(),
        extensions: schemes.extensions.clone(),
    }];
    for name in &schemes.names {
        let output = dir.join(format!("{name}.png"));
        steps.push(Step::Convert(ConvertParams {
            kind: ConverterKind::Png,
            source: dir.join(format!("{name}.ans")),
            scheme: Some(name.clone()),
            output: output.clone(),
        }));
        steps.push(Step::Resize(ResizeParams {
            source: output.clone(),
            output,
            percent: schemes.percent,
        }));
    }

    Pipeline::new("schemes", steps)
}

/// Screenshots: the SVG reference as a browser renders it, next to the PNG
/// reference. The reference documents themselves are never written.
pub fn screenshots(config: &AssetsConfig, root: &Path) -> Pipeline {
    let shots = &config.screenshots;
    let dir = root.join(&shots.dir);
    let references = root.join(&shots.reference_dir);
    let svg_shot = dir.join(&shots.svg_output);
    let png_shot = dir.join(&shots.png_output);

    let steps = vec![
        Step::Remove {
            path: svg_shot.clone(),
        },
        Step::Capture(CaptureParams {
            document: references.join(&shots.svg_document),
            selector: shots.selector.clone(),
            settle: Duration::from_millis(shots.settle_ms),
            output: svg_shot.clone(),
        }),
        Step::Resize(ResizeParams {
            source: svg_shot.clone(),
            output: svg_shot,
            percent: shots.percent,
        }),
        Step::Remove {
            path: png_shot.clone(),
        },
        Step::Resize(ResizeParams {
            source: references.join(&shots.png_document),
            output: png_shot,
            percent: shots.percent,
        }),
    ];

    Pipeline::new("screenshots", steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::BackendError;
    use crate::imaging::backend::tests::{MockBackend, OpKind, RecordedOp};
    use crate::pipeline::{StepError, run_with_backend};
    use crate::test_helpers::{file_names, setup_repo};
    use std::fs;
    use std::path::PathBuf;

    fn descriptions(pipeline: &Pipeline) -> Vec<String> {
        pipeline.steps.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn logo_plan_matches_canonical_layout() {
        let pipeline = logo(&AssetsConfig::default(), Path::new("/repo"));
        assert_eq!(
            descriptions(&pipeline),
            vec![
                "clean *.png *.svg in /repo/res/logo",
                "cp437-to-png logo.ans > logo.png",
                "cp437-to-svg logo.ans > logo.svg",
                "link full.png -> logo.png",
                "resize logo.png to 5% > small.png",
                "resize logo.png to 2% > tiny.png",
            ]
        );
    }

    #[test]
    fn schemes_plan_interleaves_convert_and_resize() {
        let pipeline = schemes(&AssetsConfig::default(), Path::new("/repo"));
        assert_eq!(
            descriptions(&pipeline),
            vec![
                "clean *.png in /repo/res/schemes",
                "cp437-to-png CLASSIC.ans CLASSIC > CLASSIC.png",
                "resize CLASSIC.png to 10% in place",
                "cp437-to-png MODERN.ans MODERN > MODERN.png",
                "resize MODERN.png to 10% in place",
            ]
        );
    }

    #[test]
    fn screenshots_plan_never_writes_references() {
        let pipeline = screenshots(&AssetsConfig::default(), Path::new("/repo"));
        assert_eq!(
            descriptions(&pipeline),
            vec![
                "remove svg.png",
                "capture <svg> of background.svg after 1000ms > svg.png",
                "resize svg.png to 5% in place",
                "remove png.png",
                "resize background.png to 5% > png.png",
            ]
        );
        let references = PathBuf::from("/repo/res/test");
        assert!(pipeline.outputs().iter().all(|p| !p.starts_with(&references)));
    }

    #[test]
    fn all_runs_logo_schemes_screenshots_in_order() {
        let names: Vec<String> =
            pipelines_for(Target::All, &AssetsConfig::default(), Path::new("."))
                .into_iter()
                .map(|p| p.name)
                .collect();
        assert_eq!(names, vec!["logo", "schemes", "screenshots"]);
    }

    #[test]
    fn logo_run_produces_expected_file_set() {
        let repo = setup_repo();
        let logo_dir = repo.path().join("res/logo");
        fs::write(logo_dir.join("old-logo.png"), "stale").unwrap();
        fs::write(logo_dir.join("retired.svg"), "stale").unwrap();
        let backend = MockBackend::new();

        run_with_backend(&logo(&AssetsConfig::default(), repo.path()), &backend, |_| {}).unwrap();

        assert_eq!(
            file_names(&logo_dir),
            vec!["full.png", "logo.ans", "logo.png", "logo.svg", "small.png", "tiny.png"]
        );
        assert_eq!(
            fs::read(logo_dir.join("full.png")).unwrap(),
            fs::read(logo_dir.join("logo.png")).unwrap()
        );
    }

    #[test]
    fn logo_run_is_idempotent() {
        let repo = setup_repo();
        let logo_dir = repo.path().join("res/logo");
        let pipeline = logo(&AssetsConfig::default(), repo.path());

        run_with_backend(&pipeline, &MockBackend::new(), |_| {}).unwrap();
        let first = file_names(&logo_dir);
        run_with_backend(&pipeline, &MockBackend::new(), |_| {}).unwrap();

        assert_eq!(file_names(&logo_dir), first);
    }

    #[test]
    fn logo_resizes_read_primary_render() {
        let repo = setup_repo();
        let backend = MockBackend::new();

        run_with_backend(&logo(&AssetsConfig::default(), repo.path()), &backend, |_| {}).unwrap();

        let resizes: Vec<(String, String, u32)> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Resize {
                    source,
                    output,
                    percent,
                } => Some((source, output, percent)),
                _ => None,
            })
            .collect();
        let primary = repo.path().join("res/logo/logo.png").to_string_lossy().to_string();
        assert_eq!(resizes.len(), 2);
        for (source, output, _) in &resizes {
            assert_eq!(source, &primary);
            assert_ne!(output, source);
        }
        assert_eq!(resizes[0].2, 5);
        assert_eq!(resizes[1].2, 2);
    }

    #[test]
    fn missing_converter_stops_logo_before_vector_render() {
        let repo = setup_repo();
        let logo_dir = repo.path().join("res/logo");
        let backend = MockBackend::failing(OpKind::Convert);

        let err = run_with_backend(&logo(&AssetsConfig::default(), repo.path()), &backend, |_| {})
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert!(matches!(
            err.source,
            StepError::Backend(BackendError::ToolMissing { .. })
        ));
        assert_eq!(file_names(&logo_dir), vec!["logo.ans"]);
    }

    #[test]
    fn schemes_invoke_converter_once_per_scheme_with_name() {
        let repo = setup_repo();
        let backend = MockBackend::new();

        run_with_backend(&schemes(&AssetsConfig::default(), repo.path()), &backend, |_| {})
            .unwrap();

        let scheme_args: Vec<String> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Convert { args, .. } => args.get(1).cloned(),
                _ => None,
            })
            .collect();
        assert_eq!(scheme_args, vec!["CLASSIC", "MODERN"]);
        assert_eq!(
            file_names(&repo.path().join("res/schemes")),
            vec!["CLASSIC.ans", "CLASSIC.png", "MODERN.ans", "MODERN.png"]
        );
    }

    #[test]
    fn retired_scheme_output_is_removed() {
        let repo = setup_repo();
        let dir = repo.path().join("res/schemes");
        fs::write(dir.join("RETRO.png"), "left over").unwrap();

        run_with_backend(&schemes(&AssetsConfig::default(), repo.path()), &MockBackend::new(), |_| {})
            .unwrap();

        assert!(!dir.join("RETRO.png").exists());
    }

    #[test]
    fn failing_scheme_aborts_remaining_schemes() {
        let repo = setup_repo();
        fs::remove_file(repo.path().join("res/schemes/CLASSIC.ans")).unwrap();
        let backend = MockBackend::new();

        let err = run_with_backend(&schemes(&AssetsConfig::default(), repo.path()), &backend, |_| {})
            .unwrap_err();

        assert_eq!(err.index, 1);
        assert!(backend.get_operations().is_empty());
        assert!(!repo.path().join("res/schemes/MODERN.png").exists());
    }

    #[test]
    fn screenshots_capture_then_normalise() {
        let repo = setup_repo();
        let shots = repo.path().join("res/screenshots");
        fs::write(shots.join("svg.png"), "previous run").unwrap();
        fs::write(shots.join("png.png"), "previous run").unwrap();
        let reference_png = repo.path().join("res/test/background.png");
        let reference_before = fs::read(&reference_png).unwrap();
        let backend = MockBackend::new();

        run_with_backend(&screenshots(&AssetsConfig::default(), repo.path()), &backend, |_| {})
            .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(&ops[0], RecordedOp::Capture { selector, .. } if selector == "svg"));
        assert!(matches!(&ops[1], RecordedOp::Resize { source, output, percent: 5 } if source == output));
        assert!(matches!(&ops[2], RecordedOp::Resize { source, output, percent: 5 } if source != output));
        assert_eq!(fs::read_to_string(shots.join("svg.png")).unwrap(), "5% of [<svg>]");
        assert_eq!(fs::read(&reference_png).unwrap(), reference_before);
    }

    #[test]
    fn screenshots_first_run_without_previous_outputs() {
        let repo = setup_repo();
        let report = run_with_backend(
            &screenshots(&AssetsConfig::default(), repo.path()),
            &MockBackend::new(),
            |_| {},
        )
        .unwrap();
        assert_eq!(report.removed_count(), 0);
        assert_eq!(
            file_names(&repo.path().join("res/screenshots")),
            vec!["png.png", "svg.png"]
        );
    }

    #[test]
    fn element_not_found_aborts_before_resize() {
        let repo = setup_repo();
        let backend = MockBackend::failing(OpKind::Capture);

        let err = run_with_backend(
            &screenshots(&AssetsConfig::default(), repo.path()),
            &backend,
            |_| {},
        )
        .unwrap_err();

        assert!(matches!(
            err.source,
            StepError::Backend(BackendError::ElementNotFound { .. })
        ));
        assert_eq!(backend.get_operations().len(), 1);
    }
}
