//! Host platform queries and environment normalisation.
//!
//! - [`host_is_64_bit`] - whether the machine can run 64-bit software, even
//!   when this binary itself is a 32-bit build.
//! - [`normalise_program_files_env`] - makes `%ProgramFiles%` point at the
//!   native program directory and guarantees `%ProgramFiles(x86)%` exists, so
//!   registry paths mean the same thing on every Windows host.
//! - [`expand_env`] - `%NAME%` placeholder expansion for registry paths.

const PROGRAM_FILES: &str = "ProgramFiles";
const PROGRAM_FILES_X86: &str = "ProgramFiles(x86)";
const PROGRAM_W6432: &str = "ProgramW6432";

/// Returns `true` if the host can run 64-bit software.
///
/// A 64-bit build trivially answers `true`. A 32-bit build asks the OS:
/// `IsWow64Process` on Windows, `uname(2)` elsewhere.
#[cfg(windows)]
pub fn host_is_64_bit() -> bool {
    use winapi::shared::minwindef::{BOOL, FALSE};
    use winapi::um::processthreadsapi::GetCurrentProcess;
    use winapi::um::wow64apiset::IsWow64Process;

    if cfg!(target_pointer_width = "64") {
        return true;
    }

    let mut wow64: BOOL = FALSE;
    // SAFETY: GetCurrentProcess returns a pseudo-handle that is always valid and
    // needs no closing; `wow64` is a valid out-pointer for the call's duration.
    let ok = unsafe { IsWow64Process(GetCurrentProcess(), &mut wow64) };
    ok != 0 && wow64 != 0
}

/// Returns `true` if the host can run 64-bit software.
#[cfg(unix)]
pub fn host_is_64_bit() -> bool {
    if cfg!(target_pointer_width = "64") {
        return true;
    }
    uname_machine().is_some_and(|m| machine_is_64_bit(&m))
}

/// Returns `true` if the host can run 64-bit software.
#[cfg(not(any(unix, windows)))]
pub fn host_is_64_bit() -> bool {
    cfg!(target_pointer_width = "64")
}

#[cfg(unix)]
fn uname_machine() -> Option<String> {
    // SAFETY: utsname is plain-old-data; an all-zero value is valid input for uname().
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: `uts` is a valid, writable utsname.
    if unsafe { libc::uname(&mut uts) } != 0 {
        return None;
    }
    // SAFETY: uname() NUL-terminates every field on success.
    let machine = unsafe { std::ffi::CStr::from_ptr(uts.machine.as_ptr()) };
    Some(machine.to_string_lossy().into_owned())
}

/// Classify a `uname -m` machine string.
pub fn machine_is_64_bit(machine: &str) -> bool {
    matches!(
        machine,
        "x86_64"
            | "amd64"
            | "aarch64"
            | "arm64"
            | "ppc64"
            | "ppc64le"
            | "s390x"
            | "riscv64"
            | "loongarch64"
            | "sparc64"
            | "mips64"
    )
}

/// Environment assignments needed to normalise the program-files variables.
///
/// - A 32-bit process on 64-bit Windows sees `%ProgramFiles%` redirected to
///   the x86 directory; `%ProgramW6432%` holds the native one and wins.
/// - A 32-bit host has no `%ProgramFiles(x86)%`; it is aliased to
///   `%ProgramFiles%`.
pub fn program_files_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = Vec::new();

    let native = lookup(PROGRAM_W6432).or_else(|| lookup(PROGRAM_FILES));
    if let Some(native) = &native {
        if lookup(PROGRAM_FILES).as_deref() != Some(native.as_str()) {
            overrides.push((PROGRAM_FILES, native.clone()));
        }
        if lookup(PROGRAM_FILES_X86).is_none() {
            overrides.push((PROGRAM_FILES_X86, native.clone()));
        }
    }

    overrides
}

/// Apply [`program_files_overrides`] to the process environment.
///
/// Must run at startup, before any other thread exists. A no-op outside Windows.
pub fn normalise_program_files_env() {
    if !cfg!(windows) {
        return;
    }
    for (key, value) in program_files_overrides(|k| std::env::var(k).ok()) {
        log::debug!("setting %{}% to {}", key, value);
        std::env::set_var(key, value);
    }
}

/// Expand `%NAME%` placeholders using `lookup`.
///
/// Unknown names and an unmatched `%` are kept verbatim.
pub fn expand_env_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) => {
                let name = &after[..end];
                match lookup(name).filter(|_| !name.is_empty()) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('%');
                        out.push_str(name);
                        out.push('%');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Expand `%NAME%` placeholders from the process environment.
pub fn expand_env(input: &str) -> String {
    expand_env_with(input, |k| std::env::var(k).ok())
}
