//! Default process- and filesystem-backed port implementations.

use crate::ports::{HtmlConverter, RepoProbe, WritePort};
use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use sbreport_types::{Remote, RepositoryStatus};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Head identifier reported for a repository without commits.
const NO_HEAD: &str = "unknown";

/// Repository probe that shells out to `git`.
#[derive(Debug, Clone, Default)]
pub struct ShellGitProbe;

impl ShellGitProbe {
    /// Run git in `root`. `Ok(None)` when git ran but exited non-zero.
    fn git(root: &Utf8Path, args: &[&str]) -> anyhow::Result<Option<String>> {
        let output = Command::new("git")
            .args(args)
            .current_dir(root)
            .output()
            .with_context(|| format!("launch git {}", args.join(" ")))?;
        if !output.status.success() {
            debug!(args = ?args, status = %output.status, "git exited non-zero");
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }
}

impl RepoProbe for ShellGitProbe {
    fn probe(&self, path: &Utf8Path) -> anyhow::Result<RepositoryStatus> {
        if !path.is_dir() {
            return Ok(RepositoryStatus::Invalid);
        }
        match Self::git(path, &["rev-parse", "--is-inside-work-tree"])? {
            Some(out) if out == "true" => {}
            _ => return Ok(RepositoryStatus::Invalid),
        }

        let names = Self::git(path, &["remote"])?.unwrap_or_default();
        let mut remotes = Vec::new();
        for name in names.lines().map(str::trim).filter(|n| !n.is_empty()) {
            let url = Self::git(path, &["remote", "get-url", name])?.filter(|u| !u.is_empty());
            remotes.push(Remote {
                name: name.to_string(),
                url,
            });
        }
        remotes.sort();

        let clean = Self::git(path, &["status", "--porcelain"])?
            .map(|s| s.is_empty())
            .unwrap_or(false);
        let head = Self::git(path, &["rev-parse", "HEAD"])?
            .unwrap_or_else(|| NO_HEAD.to_string());

        debug!(path = %path, remotes = remotes.len(), clean, head = %head, "probed repository");
        Ok(RepositoryStatus::Valid {
            remotes,
            clean,
            head,
        })
    }
}

/// Fixed repository status for embedding and testing.
#[derive(Debug, Clone)]
pub struct FixedRepoProbe {
    status: RepositoryStatus,
}

impl FixedRepoProbe {
    pub fn new(status: RepositoryStatus) -> Self {
        Self { status }
    }
}

impl RepoProbe for FixedRepoProbe {
    fn probe(&self, _path: &Utf8Path) -> anyhow::Result<RepositoryStatus> {
        Ok(self.status.clone())
    }
}

/// Converts AsciiDoc to HTML by piping it through an external program.
#[derive(Debug, Clone)]
pub struct AsciidoctorConverter {
    program: String,
    args: Vec<String>,
}

impl AsciidoctorConverter {
    /// `asciidoctor` reading stdin and writing HTML5 to stdout.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_args(
            program,
            ["--backend", "html5", "--out-file", "-", "-"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    pub fn with_args(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for AsciidoctorConverter {
    fn default() -> Self {
        Self::new("asciidoctor")
    }
}

impl HtmlConverter for AsciidoctorConverter {
    fn convert(&self, markup: &str) -> anyhow::Result<String> {
        debug!(program = %self.program, bytes = markup.len(), "converting markup to html");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("launch {}", self.program))?;

        let mut stdin = child.stdin.take().context("converter stdin unavailable")?;
        let input = markup.to_string();
        let feeder = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("wait for {}", self.program))?;
        let fed = feeder
            .join()
            .map_err(|_| anyhow::anyhow!("converter input thread panicked"))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        fed.with_context(|| format!("write markup to {}", self.program))?;
        String::from_utf8(output.stdout).context("converter produced non UTF-8 output")
    }
}

/// Filesystem write operations.
///
/// Files are written to a temporary sibling and renamed into place, so the
/// destination holds either its previous contents or the complete new ones.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create parent dir for {}", path))?;
                parent
            }
            _ => Utf8Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".sbreport-").suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o644));
        }
        let mut tmp = builder
            .tempfile_in(dir)
            .with_context(|| format!("create temporary file for {}", path))?;
        tmp.write_all(contents)
            .with_context(|| format!("write {}", path))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("sync {}", path))?;
        tmp.persist(path)
            .with_context(|| format!("replace {}", path))?;
        debug!(path = %path, bytes = contents.len(), "wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn run_git(root: &Utf8Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(root)
            .status()
            .expect("run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        (temp, root)
    }

    #[test]
    fn fs_write_port_writes_and_creates_dirs() {
        let (_temp, root) = temp_root();
        let target = root.join("nested").join("report.txt");

        FsWritePort.write_file(&target, b"hello").expect("write");

        let contents = std::fs::read_to_string(&target).expect("read");
        assert_eq!(contents, "hello");
    }

    fn leftovers(dir: &Utf8Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".sbreport-"))
            .collect()
    }

    #[test]
    fn fs_write_port_replaces_existing_file_whole() {
        let (_temp, root) = temp_root();
        let target = root.join("report.txt");
        std::fs::write(&target, "old report that is longer than the new one").expect("seed");

        FsWritePort.write_file(&target, b"new").expect("write");

        assert_eq!(std::fs::read_to_string(&target).expect("read"), "new");
        assert!(leftovers(&root).is_empty());
    }

    #[test]
    fn fs_write_port_failure_keeps_destination_and_cleans_up() {
        let (_temp, root) = temp_root();
        // A non-empty directory can never be replaced by a file.
        let target = root.join("report.txt");
        std::fs::create_dir(&target).expect("mkdir");
        std::fs::write(target.join("keep"), "x").expect("seed");

        let err = FsWritePort.write_file(&target, b"new").unwrap_err();
        assert!(format!("{err:#}").contains("report.txt"));
        drop(err);

        assert!(target.join("keep").is_file());
        assert!(leftovers(&root).is_empty());
    }

    #[test]
    fn fs_write_port_reports_unwritable_target() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join("file"), "x").expect("write");
        let err = FsWritePort
            .write_file(&root.join("file").join("report.txt"), b"x")
            .unwrap_err();
        assert!(err.to_string().contains("report.txt"));
    }

    #[test]
    fn shell_git_probe_is_invalid_outside_repo() {
        let (_temp, root) = temp_root();
        let status = ShellGitProbe.probe(&root).expect("probe");
        assert_eq!(status, RepositoryStatus::Invalid);
    }

    #[test]
    fn shell_git_probe_reads_remotes_head_and_dirty() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join("tools.bset"), "gcc.cfg\n").expect("write");

        run_git(&root, &["init"]);
        run_git(&root, &["config", "user.email", "test@example.com"]);
        run_git(&root, &["config", "user.name", "Test User"]);
        run_git(&root, &["remote", "add", "origin", "git://example.org/sb.git"]);
        run_git(&root, &["remote", "add", "backup", "/srv/mirror/sb.git"]);
        run_git(&root, &["add", "."]);
        run_git(&root, &["commit", "-m", "init"]);

        let RepositoryStatus::Valid {
            remotes,
            clean,
            head,
        } = ShellGitProbe.probe(&root).expect("probe")
        else {
            panic!("expected a valid repository");
        };
        assert_eq!(
            remotes,
            vec![
                Remote::new("backup", Some("/srv/mirror/sb.git")),
                Remote::new("origin", Some("git://example.org/sb.git")),
            ]
        );
        assert!(clean);
        assert_eq!(head.len(), 40);

        std::fs::write(root.join("tools.bset"), "gcc.cfg\nm4.cfg\n").expect("write");
        match ShellGitProbe.probe(&root).expect("probe") {
            RepositoryStatus::Valid { clean, .. } => assert!(!clean),
            RepositoryStatus::Invalid => panic!("expected a valid repository"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn converter_pipes_markup_through_program() {
        let conv = AsciidoctorConverter::with_args("cat", vec![]);
        let out = conv.convert("== Title\n").expect("convert");
        assert_eq!(out, "== Title\n");
    }

    #[test]
    fn converter_missing_program_fails() {
        let conv = AsciidoctorConverter::new("sbreport-no-such-converter");
        let err = conv.convert("x").unwrap_err();
        assert!(err.to_string().contains("launch sbreport-no-such-converter"));
    }

    #[test]
    fn fixed_probe_returns_its_status() {
        let probe = FixedRepoProbe::new(RepositoryStatus::Invalid);
        assert!(!probe.probe(Utf8Path::new(".")).unwrap().is_valid());
    }
}
