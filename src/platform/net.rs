use crate::core::system_monitor::ConnectionSample;
use crate::error::Result;

#[cfg(target_os = "linux")]
pub fn open_connections() -> Result<Vec<ConnectionSample>> {
    use crate::core::system_monitor::ConnectionStatus;
    use crate::error::MonitorError;
    use procfs::net::{TcpState, UdpState};

    let owners = linux::socket_owners();
    let mut connections = Vec::new();
    let mut readable_tables = 0;

    for (label, table) in [("tcp", procfs::net::tcp()), ("tcp6", procfs::net::tcp6())] {
        match table {
            Ok(entries) => {
                readable_tables += 1;
                connections.extend(entries.iter().filter_map(|entry| {
                    let status = match entry.state {
                        TcpState::Established => ConnectionStatus::Established,
                        TcpState::SynSent => ConnectionStatus::SynSent,
                        TcpState::SynRecv | TcpState::NewSynRecv => ConnectionStatus::SynRecv,
                        TcpState::FinWait1 => ConnectionStatus::FinWait1,
                        TcpState::FinWait2 => ConnectionStatus::FinWait2,
                        TcpState::TimeWait => ConnectionStatus::TimeWait,
                        TcpState::Close => ConnectionStatus::Close,
                        TcpState::CloseWait => ConnectionStatus::CloseWait,
                        TcpState::LastAck => ConnectionStatus::LastAck,
                        TcpState::Listen => ConnectionStatus::Listen,
                        TcpState::Closing => ConnectionStatus::Closing,
                    };
                    linux::sample(
                        entry.local_address,
                        entry.remote_address,
                        status,
                        entry.inode,
                        &owners,
                    )
                }));
            }
            Err(e) => log::debug!("skipping unreadable {} table: {}", label, e),
        }
    }

    for (label, table) in [("udp", procfs::net::udp()), ("udp6", procfs::net::udp6())] {
        match table {
            Ok(entries) => {
                readable_tables += 1;
                connections.extend(entries.iter().filter_map(|entry| {
                    let status = match entry.state {
                        UdpState::Established => ConnectionStatus::Established,
                        UdpState::Close => ConnectionStatus::Close,
                    };
                    linux::sample(
                        entry.local_address,
                        entry.remote_address,
                        status,
                        entry.inode,
                        &owners,
                    )
                }));
            }
            Err(e) => log::debug!("skipping unreadable {} table: {}", label, e),
        }
    }

    if readable_tables == 0 {
        return Err(MonitorError::provider_unavailable(
            "no socket table could be read",
        ));
    }

    Ok(connections)
}

#[cfg(not(target_os = "linux"))]
pub fn open_connections() -> Result<Vec<ConnectionSample>> {
    log::debug!("socket enumeration is not supported on this platform");
    Ok(Vec::new())
}

#[cfg(target_os = "linux")]
mod linux {
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use procfs::process::FDTarget;

    use crate::core::system_monitor::{ConnectionSample, ConnectionStatus};

    pub struct Owner {
        pid: u32,
        name: Option<String>,
    }

    /// Map socket inodes to the processes holding them. Processes whose fd
    /// table is not readable by the current user are left out.
    pub fn socket_owners() -> HashMap<u64, Owner> {
        let mut owners = HashMap::new();
        let processes = match procfs::process::all_processes() {
            Ok(processes) => processes,
            Err(e) => {
                log::debug!("process table unreadable for socket ownership: {}", e);
                return owners;
            }
        };

        for process in processes.flatten() {
            let Ok(fds) = process.fd() else {
                continue;
            };
            let name = process.stat().ok().map(|stat| stat.comm);

            for fd in fds.flatten() {
                if let FDTarget::Socket(inode) = fd.target {
                    owners.insert(
                        inode,
                        Owner {
                            pid: process.pid as u32,
                            name: name.clone(),
                        },
                    );
                }
            }
        }

        owners
    }

    pub fn sample(
        local: SocketAddr,
        remote: SocketAddr,
        status: ConnectionStatus,
        inode: u64,
        owners: &HashMap<u64, Owner>,
    ) -> Option<ConnectionSample> {
        let remote_address = if remote.ip().is_unspecified() && remote.port() == 0 {
            None
        } else {
            Some(format_addr(&remote))
        };

        // Unconnected, non-listening sockets are noise
        if status != ConnectionStatus::Listen && remote_address.is_none() {
            return None;
        }

        let (pid, process_name) = match owners.get(&inode) {
            Some(owner) => (
                Some(owner.pid),
                owner.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            ),
            None => (None, "System".to_string()),
        };

        Some(ConnectionSample {
            local_address: Some(format_addr(&local)),
            remote_address,
            status,
            pid,
            process_name,
        })
    }

    fn format_addr(addr: &SocketAddr) -> String {
        format!("{}:{}", addr.ip(), addr.port())
    }

}
