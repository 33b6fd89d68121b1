use kernel_module::{Host, KernelModule, ModuleError, ModuleHandle};
use kernel_sync::Task;
use std::io::{self, Write};

/// One step of a session against a loaded module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// List directories and their files.
    Ls,
    Read(String),
    Write(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("unknown command `{0}` (expected ls, read or write)")]
    Unknown(String),
    #[error("`{0}` is missing its {1} argument")]
    MissingArgument(&'static str, &'static str),
}

/// Parses `ls`, `read NAME` and `write NAME VALUE` sequences.
pub fn parse_ops(words: &[String]) -> Result<Vec<Op>, OpError> {
    let mut ops = Vec::new();
    let mut words = words.iter();
    while let Some(word) = words.next() {
        let op = match word.as_str() {
            "ls" => Op::Ls,
            "read" => Op::Read(
                words
                    .next()
                    .ok_or(OpError::MissingArgument("read", "NAME"))?
                    .clone(),
            ),
            "write" => {
                let name = words
                    .next()
                    .ok_or(OpError::MissingArgument("write", "NAME"))?
                    .clone();
                let value = words
                    .next()
                    .ok_or(OpError::MissingArgument("write", "VALUE"))?
                    .clone();
                Op::Write(name, value)
            }
            other => return Err(OpError::Unknown(other.to_string())),
        };
        ops.push(op);
    }
    Ok(ops)
}

/// Loads `M`, runs `ops` in order, and unloads it again.
///
/// Failing reads and writes are reported on `out` and do not end the
/// session; a failing activation does.
pub fn session<M: KernelModule>(
    host: &Host,
    ops: &[Op],
    out: &mut impl Write,
) -> io::Result<Result<(), ModuleError>> {
    let handle = match host.load::<M>() {
        Ok(handle) => handle,
        Err(e) => {
            writeln!(out, "insmod {}: {e} ({})", M::NAME, e.errno())?;
            return Ok(Err(e));
        }
    };
    let task = Task::new("modhost");
    for op in ops {
        run_op(host, &handle, &task, op, out)?;
    }
    handle.unload();
    Ok(Ok(()))
}

fn run_op<M: KernelModule>(
    host: &Host,
    handle: &ModuleHandle<'_, M>,
    task: &Task,
    op: &Op,
    out: &mut impl Write,
) -> io::Result<()> {
    match op {
        Op::Ls => {
            for dir in host.sysfs().list_dirs() {
                writeln!(out, "{dir}/")?;
                for entry in host.sysfs().list(&dir).unwrap_or_default() {
                    writeln!(out, "  {} {}", entry.mode, entry.name)?;
                }
            }
        }
        Op::Read(name) => match handle.read(task, name) {
            Ok(bytes) => writeln!(out, "{name}: {}", bytes.escape_ascii())?,
            Err(e) => writeln!(out, "read {name}: {e} ({})", e.errno())?,
        },
        Op::Write(name, value) => match handle.write(task, name, value.as_bytes()) {
            Ok(n) => writeln!(out, "write {name}: {n} bytes")?,
            Err(e) => writeln!(out, "write {name}: {e} ({})", e.errno())?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_module::HostConfig;
    use sysfs_simple_intf::SysfsSimpleIntf;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn parses_command_sequences() {
        assert_eq!(
            parse_ops(&words("ls read a write b 2 read b")).unwrap(),
            [
                Op::Ls,
                Op::Read("a".into()),
                Op::Write("b".into(), "2".into()),
                Op::Read("b".into()),
            ]
        );
        assert!(parse_ops(&[]).unwrap().is_empty());
    }

    #[test]
    fn reports_bad_sequences() {
        assert_eq!(
            parse_ops(&words("cat x")),
            Err(OpError::Unknown("cat".into()))
        );
        assert_eq!(
            parse_ops(&words("write x")),
            Err(OpError::MissingArgument("write", "VALUE"))
        );
        assert_eq!(
            parse_ops(&words("read")),
            Err(OpError::MissingArgument("read", "NAME"))
        );
    }

    #[test]
    fn runs_a_session() {
        let host = Host::new(HostConfig::default()).unwrap();
        let ops = parse_ops(&words("ls write debug_level 2 read debug_level write debug_level 9 read pressure")).unwrap();
        let mut out = Vec::new();
        session::<SysfsSimpleIntf>(&host, &ops, &mut out).unwrap().unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "llkd_sysfs_simple_intf_device/\n\
             \x20 0644 debug_level\n\
             \x20 0444 page_offset\n\
             \x20 0440 pressure\n\
             write debug_level: 1 bytes\n\
             debug_level: 2\\n\n\
             write debug_level: value outside the permitted range (-14)\n\
             pressure: 25\n"
        );
        assert!(host.sysfs().list_dirs().is_empty());
    }

    #[test]
    fn failed_activation_is_reported() {
        let host = Host::new(HostConfig {
            sysfs_enabled: false,
            ..HostConfig::default()
        })
        .unwrap();
        let mut out = Vec::new();
        let r = session::<SysfsSimpleIntf>(&host, &[Op::Ls], &mut out).unwrap();
        assert!(r.is_err());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "insmod sysfs_simple_intf: operation not supported (-95)\n"
        );
    }
}
