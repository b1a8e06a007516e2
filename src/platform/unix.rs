use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io;
use tokio::process::Command;

/// Detach the child into its own process group and, on Linux, arrange for
/// the kernel to deliver SIGTERM should the supervisor itself die first.
pub fn prepare_command(cmd: &mut Command) {
    unsafe {
        cmd.pre_exec(|| {
            if libc::setpgid(0, 0) != 0 {
                return Err(io::Error::last_os_error());
            }
            #[cfg(target_os = "linux")]
            if libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

/// Signal-0 liveness probe. EPERM still means the process exists.
pub fn process_alive(pid: u32) -> bool {
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(errno) => errno == Errno::EPERM,
    }
}

pub fn send_sigterm(pid: u32) -> Result<(), Errno> {
    kill(Pid::from_raw(pid as i32), Signal::SIGTERM)
}

pub fn send_sigkill(pid: u32) -> Result<(), Errno> {
    kill(Pid::from_raw(pid as i32), Signal::SIGKILL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_process_is_alive() {
        assert!(process_alive(std::process::id()));
    }

    #[test]
    fn signalling_a_missing_process_reports_esrch() {
        // PID near the default pid_max ceiling; nothing should be running
        // there inside the test environment.
        let pid = 4_194_000;
        if !process_alive(pid) {
            assert_eq!(send_sigterm(pid), Err(Errno::ESRCH));
        }
    }
}
