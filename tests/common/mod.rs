//! Shared helpers for integration tests
//!
//! Builds a complete on-disk solution fixture: a solution root with the
//! project descriptor and skeleton templates, plus one sub-project per
//! requested component with its build configuration and a prebuilt output
//! tree. Paired with a no-op build runner, the fixture exercises the full
//! pipeline without spawning any external tooling.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use solution_packager::builder::{BuildExit, BuildRunner};
use solution_packager::error::Result;

pub const SOLUTION_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ImportExportXml version="9.1.0.643" SolutionPackageVersion="9.1" languagecode="1033" generatedBy="CrmLive">
  <SolutionManifest>
    <UniqueName>SampleSolution</UniqueName>
    <Version>1.0.0.0</Version>
    <Managed>0</Managed>
    <Publisher>
      <UniqueName>samplepublisher</UniqueName>
      <CustomizationPrefix>pcf</CustomizationPrefix>
    </Publisher>
    <RootComponents />
    <MissingDependencies />
  </SolutionManifest>
</ImportExportXml>
"#;

pub const CUSTOMIZATIONS_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ImportExportXml xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Entities />
  <Roles />
  <CustomControls />
  <Languages>
    <Language>1033</Language>
  </Languages>
</ImportExportXml>
"#;

/// One component to scaffold: directory name, component name, namespace.
pub struct ComponentSpec<'a> {
    pub project: &'a str,
    pub name: &'a str,
    pub namespace: &'a str,
}

/// Create a solution root named `sample` under `base`, referencing one
/// sub-project per component spec, each with its build output already in
/// place. Returns the solution root path.
pub fn scaffold_solution(base: &Path, components: &[ComponentSpec]) -> PathBuf {
    let root = base.join("sample");
    let other = root.join("src/Other");
    fs::create_dir_all(&other).unwrap();
    fs::write(other.join("Solution.xml"), SOLUTION_TEMPLATE).unwrap();
    fs::write(other.join("Customizations.xml"), CUSTOMIZATIONS_TEMPLATE).unwrap();

    let references = components
        .iter()
        .map(|c| format!(r#"    <ProjectReference Include="..\{0}\{0}.pcfproj" />"#, c.project))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(
        root.join("sample.cdsproj"),
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Project>\n  <ItemGroup>\n{}\n  </ItemGroup>\n</Project>\n",
            references
        ),
    )
    .unwrap();

    for component in components {
        scaffold_sub_project(base, component);
    }
    root
}

/// Create one sub-project with its `pcfconfig.json` and a prebuilt output
/// tree `out/<Name>/` containing a manifest and a bundle.
pub fn scaffold_sub_project(base: &Path, component: &ComponentSpec) {
    let project_root = base.join(component.project);
    let component_dir = project_root.join("out").join(component.name);
    fs::create_dir_all(component_dir.join("css")).unwrap();
    fs::write(
        project_root.join("pcfconfig.json"),
        r#"{ "outDir": "out" }"#,
    )
    .unwrap();
    fs::write(
        component_dir.join("ControlManifest.xml"),
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<manifest>
  <control namespace="{}" constructor="{}" version="0.0.1" control-type="standard">
    <code path="bundle.js" order="1" />
  </control>
</manifest>
"#,
            component.namespace, component.name
        ),
    )
    .unwrap();
    fs::write(component_dir.join("bundle.js"), "\"use strict\";\n").unwrap();
    fs::write(component_dir.join("css/style.css"), ".control {}\n").unwrap();
}

/// Build runner that spawns nothing: counts invocations and reports a
/// fixed exit code, leaving the prebuilt output in place.
pub struct MockRunner {
    calls: AtomicUsize,
    code: Option<i32>,
}

impl MockRunner {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            code: Some(0),
        }
    }

    pub fn failing(code: i32) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            code: Some(code),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BuildRunner for MockRunner {
    fn run_build(&self, _project_root: &Path) -> Result<BuildExit> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(BuildExit {
            code: self.code,
            stderr: String::new(),
        })
    }
}
