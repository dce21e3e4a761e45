// The orchestrator driven through the public traits with a recording catalog.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use embark::orchestrator::{interactive_packages, run};
use embark::registry::{Catalog, PackageEntry};
use embark::{Arch, Error, Mode, Outcome};

#[derive(Default)]
struct Journal(RefCell<Vec<String>>);

struct Entry<'j> {
    name: &'static str,
    interactive: bool,
    ok: bool,
    journal: &'j Journal,
}

impl Entry<'_> {
    fn log(&self, what: &str, arch: Arch) -> embark::Result<()> {
        self.journal
            .0
            .borrow_mut()
            .push(format!("{what} {} {arch}", self.name));
        if self.ok {
            Ok(())
        } else {
            Err(Error::InstallerFailed {
                program: PathBuf::from(self.name),
                status: "exit status: 1".into(),
            })
        }
    }
}

impl PackageEntry for Entry<'_> {
    fn is_interactive(&self) -> bool {
        self.interactive
    }
    fn install(&self, arch: Arch, _force: bool) -> embark::Result<()> {
        self.log("install", arch)
    }
    fn download_installer(&self, arch: Arch, _force: bool) -> embark::Result<PathBuf> {
        self.log("download", arch).map(|()| PathBuf::new())
    }
    fn create_shims(&self, arch: Arch) -> embark::Result<()> {
        self.log("shim", arch)
    }
}

struct Entries<'j>(BTreeMap<&'static str, Entry<'j>>);

impl<'j> Catalog for Entries<'j> {
    type Entry = Entry<'j>;
    fn lookup(&self, name: &str) -> Option<&Entry<'j>> {
        self.0.get(name)
    }
}

fn entries(journal: &Journal, b_ok: bool) -> Entries<'_> {
    Entries(BTreeMap::from([
        (
            "a",
            Entry {
                name: "a",
                interactive: false,
                ok: true,
                journal,
            },
        ),
        (
            "b",
            Entry {
                name: "b",
                interactive: true,
                ok: b_ok,
                journal,
            },
        ),
    ]))
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn same_arch_for_every_package_in_request_order() {
    let journal = Journal::default();
    let catalog = entries(&journal, false);
    let request = names(&["a", "b", "missing", "a"]);

    assert_eq!(interactive_packages(&catalog, &request), vec!["b"]);
    let result = run(&catalog, &request, Mode::Install, Arch::X86, true);

    assert_eq!(
        *journal.0.borrow(),
        vec!["install a x86", "install b x86", "install a x86"]
    );
    assert_eq!(result.outcomes[2].outcome, Outcome::SkippedUnknown);
    let err = result.into_result().unwrap_err();
    assert_eq!(err.to_string(), "one or more packages failed to install: b");
}

#[test]
fn duplicate_failures_are_each_recorded() {
    let journal = Journal::default();
    let catalog = entries(&journal, false);
    let result = run(&catalog, &names(&["b", "b"]), Mode::Install, Arch::X86_64, false);
    assert_eq!(result.failures(), vec!["b", "b"]);
}

#[test]
fn discarding_modes_succeed() {
    for mode in [Mode::ShimOnly, Mode::DownloadOnly] {
        let journal = Journal::default();
        let catalog = entries(&journal, false);
        let result = run(&catalog, &names(&["b", "missing"]), mode, Arch::X86_64, false);
        assert_eq!(journal.0.borrow().len(), 1);
        assert!(result.into_result().is_ok(), "{mode}");
    }
}
