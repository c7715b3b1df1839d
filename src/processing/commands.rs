//! Router configuration for the linear chain.
//!
//! Builds one [`RouterConfig`] per router and renders the whole chain as
//! Cisco-style command text.

use crate::config::Settings;
use crate::models::{HostSubnet, RoutingMode, SerialLink};
use itertools::Itertools;
use serde::Serialize;
use std::net::Ipv4Addr;

pub const BANNER_RULE: &str = "! =============================";
pub const BANNER_TITLE: &str = "! Commands for Router R";
pub const CLOSING_REMINDER: &str =
    "! Remember to assign the IPs to the PCs and switches accordingly";

/// A route to a network that is not directly connected.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    pub destination: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub next_hop: Ipv4Addr,
}

/// Routing section of one router.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Routing {
    /// RIPv2 network statements for the directly connected networks.
    Rip { networks: Vec<Ipv4Addr> },
    Static { routes: Vec<StaticRoute> },
}

/// Everything configured on router `R{index}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    pub index: usize,
    pub lan: Option<HostSubnet>,
    /// Link `index - 1`, this router holds its DTE address.
    pub previous_link: Option<SerialLink>,
    /// Link `index`, this router holds its DCE address and clocks it.
    pub next_link: Option<SerialLink>,
    pub routing: Routing,
}

/// Target of a route, identified by its position in the chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Destination {
    /// LAN owned by router `j`.
    Lan(usize),
    /// Link between routers `k` and `k + 1`.
    Link(usize),
}

impl Destination {
    fn is_connected_to(self, router: usize) -> bool {
        match self {
            Destination::Lan(j) => j == router,
            Destination::Link(k) => k == router || k + 1 == router,
        }
    }

    /// True when the destination lies towards higher router indexes.
    fn is_downstream_of(self, router: usize) -> bool {
        match self {
            Destination::Lan(j) => router < j,
            Destination::Link(k) => router <= k,
        }
    }
}

/// Build the configuration of every router in the chain.
///
/// `links[k]` joins router `k` to router `k + 1`; router `i` owns `lans[i]`
/// when it exists.
pub fn build_routers(
    lans: &[HostSubnet],
    links: &[SerialLink],
    mode: RoutingMode,
) -> Vec<RouterConfig> {
    let routers = links.len() + 1;
    log::info!("building {routers} router configs, routing={mode}");

    (0..routers)
        .map(|i| {
            let lan = lans.get(i).copied();
            let previous_link = i.checked_sub(1).and_then(|p| links.get(p)).copied();
            let next_link = links.get(i).copied();

            let routing = match mode {
                RoutingMode::Rip => Routing::Rip {
                    networks: lan
                        .map(|l| l.subnet)
                        .into_iter()
                        .chain(previous_link.map(|l| l.subnet))
                        .chain(next_link.map(|l| l.subnet))
                        .map(|s| s.network)
                        .collect(),
                },
                RoutingMode::Static => Routing::Static {
                    routes: static_routes(i, lans, links),
                },
            };

            RouterConfig {
                index: i,
                lan,
                previous_link,
                next_link,
                routing,
            }
        })
        .collect()
}

/// Static routes from router `i` to every network it is not attached to.
fn static_routes(i: usize, lans: &[HostSubnet], links: &[SerialLink]) -> Vec<StaticRoute> {
    let towards_next = links.get(i).map(|l| l.dte);
    let towards_previous = i.checked_sub(1).and_then(|p| links.get(p)).map(|l| l.dce);

    let targets = lans
        .iter()
        .enumerate()
        .map(|(j, l)| (Destination::Lan(j), l.subnet))
        .chain(
            links
                .iter()
                .enumerate()
                .map(|(k, l)| (Destination::Link(k), l.subnet)),
        );

    targets
        .filter(|(dest, _)| !dest.is_connected_to(i))
        .filter_map(|(dest, subnet)| {
            let next_hop = if dest.is_downstream_of(i) {
                towards_next
            } else {
                towards_previous
            };
            match next_hop {
                Some(next_hop) => Some(StaticRoute {
                    destination: subnet.network,
                    mask: subnet.mask,
                    next_hop,
                }),
                None => {
                    log::warn!("router R{i}: no neighbour towards {:?}", dest);
                    None
                }
            }
        })
        .collect()
}

impl RouterConfig {
    /// Interface and routing directives, without the banner.
    pub fn directives(&self, settings: &Settings) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(lan) = &self.lan {
            let n = self.index + 1;
            lines.push(format!("interface {}", settings.lan_interface));
            lines.push(format!(" ip address {} {}", lan.gateway, lan.subnet.mask));
            lines.push(" no shutdown".to_string());
            lines.push(format!("! Connect to Switch S{n} and PC{n} (example)"));
            lines.push(format!(
                "! PC{n} IP: {} / Mask: {} / Gateway: {}",
                lan.first_host, lan.subnet.mask, lan.gateway
            ));
        }
        if let Some(link) = &self.previous_link {
            lines.push(format!(
                "interface {}{}",
                settings.serial_interface_prefix,
                self.index - 1
            ));
            lines.push(format!(" ip address {} {}", link.dte, link.subnet.mask));
            lines.push(" no shutdown".to_string());
        }
        if let Some(link) = &self.next_link {
            lines.push(format!(
                "interface {}{}",
                settings.serial_interface_prefix, self.index
            ));
            lines.push(format!(" ip address {} {}", link.dce, link.subnet.mask));
            lines.push(format!(" clock rate {}", settings.clock_rate));
            lines.push(" no shutdown".to_string());
        }

        match &self.routing {
            Routing::Rip { networks } => {
                lines.push("router rip".to_string());
                lines.push(" version 2".to_string());
                lines.extend(networks.iter().map(|n| format!(" network {n}")));
                lines.push(" no auto-summary".to_string());
            }
            Routing::Static { routes } => {
                lines.extend(
                    routes
                        .iter()
                        .map(|r| format!("ip route {} {} {}", r.destination, r.mask, r.next_hop)),
                );
            }
        }
        lines
    }
}

/// Render every router's commands as one newline-joined text.
pub fn render_commands(routers: &[RouterConfig], settings: &Settings) -> String {
    let mut lines: Vec<String> = Vec::new();
    for router in routers {
        lines.push(BANNER_RULE.to_string());
        lines.push(format!("{BANNER_TITLE}{}", router.index));
        lines.push(BANNER_RULE.to_string());
        lines.extend(router.directives(settings));
        lines.push(format!("{BANNER_RULE}\n"));
    }
    lines.push(CLOSING_REMINDER.to_string());
    lines.iter().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::topology::build_links;
    use crate::processing::vlsm::divide_hosts;

    fn chain(hosts: &[u32], mode: RoutingMode) -> Vec<RouterConfig> {
        let lans = divide_hosts(0x0A000100, hosts).unwrap();
        let links = build_links(lans.len(), Ipv4Addr::new(10, 10, 10, 0)).unwrap();
        build_routers(&lans, &links, mode)
    }

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[test]
    fn test_router_interfaces() {
        let routers = chain(&[50, 10, 2], RoutingMode::Rip);
        assert_eq!(routers.len(), 4);

        assert!(routers[0].previous_link.is_none());
        assert_eq!(routers[0].next_link.unwrap().dce, ip("10.10.10.1"));
        assert_eq!(routers[1].previous_link.unwrap().dte, ip("10.10.10.2"));
        assert_eq!(routers[1].next_link.unwrap().dce, ip("10.10.10.5"));

        let last = &routers[3];
        assert!(last.lan.is_none(), "last router has no LAN");
        assert_eq!(last.previous_link.unwrap().dte, ip("10.10.10.10"));
        assert!(last.next_link.is_none());
    }

    #[test]
    fn test_rip_networks() {
        let routers = chain(&[50, 10, 2], RoutingMode::Rip);
        assert_eq!(
            routers[0].routing,
            Routing::Rip {
                networks: vec![ip("10.0.1.0"), ip("10.10.10.0")]
            }
        );
        assert_eq!(
            routers[1].routing,
            Routing::Rip {
                networks: vec![ip("10.0.1.64"), ip("10.10.10.0"), ip("10.10.10.4")]
            }
        );
        assert_eq!(
            routers[3].routing,
            Routing::Rip {
                networks: vec![ip("10.10.10.8")]
            }
        );
    }

    fn routes(router: &RouterConfig) -> &[StaticRoute] {
        match &router.routing {
            Routing::Static { routes } => routes,
            Routing::Rip { .. } => panic!("expected static routing"),
        }
    }

    #[test]
    fn test_static_routes_first_router() {
        let routers = chain(&[50, 10, 2], RoutingMode::Static);
        let r0 = routes(&routers[0]);
        // Everything is downstream of R0, via R1's DTE address.
        let expected: Vec<(Ipv4Addr, Ipv4Addr)> = vec![
            (ip("10.0.1.64"), ip("10.10.10.2")),
            (ip("10.0.1.80"), ip("10.10.10.2")),
            (ip("10.10.10.4"), ip("10.10.10.2")),
            (ip("10.10.10.8"), ip("10.10.10.2")),
        ];
        let got: Vec<(Ipv4Addr, Ipv4Addr)> = r0.iter().map(|r| (r.destination, r.next_hop)).collect();
        assert_eq!(got, expected);
        assert_eq!(r0[0].mask, ip("255.255.255.240"));
    }

    #[test]
    fn test_static_routes_last_router() {
        let routers = chain(&[50, 10, 2], RoutingMode::Static);
        let r3 = routes(&routers[3]);
        // Everything is upstream of R3, via R2's DCE address on link 2.
        assert_eq!(r3.len(), 5);
        assert!(r3.iter().all(|r| r.next_hop == ip("10.10.10.9")));
        let destinations: Vec<Ipv4Addr> = r3.iter().map(|r| r.destination).collect();
        assert_eq!(
            destinations,
            vec![
                ip("10.0.1.0"),
                ip("10.0.1.64"),
                ip("10.0.1.80"),
                ip("10.10.10.0"),
                ip("10.10.10.4")
            ]
        );
    }

    #[test]
    fn test_static_routes_middle_router() {
        let routers = chain(&[50, 10, 2], RoutingMode::Static);
        let r1 = routes(&routers[1]);
        let got: Vec<(Ipv4Addr, Ipv4Addr)> = r1.iter().map(|r| (r.destination, r.next_hop)).collect();
        assert_eq!(
            got,
            vec![
                (ip("10.0.1.0"), ip("10.10.10.1")),
                (ip("10.0.1.80"), ip("10.10.10.6")),
                (ip("10.10.10.8"), ip("10.10.10.6")),
            ]
        );
    }

    #[test]
    fn test_static_routes_never_self() {
        for n in 1..6 {
            let hosts: Vec<u32> = (1..=n).map(|h| h * 7).collect();
            let routers = chain(&hosts, RoutingMode::Static);
            let total = 2 * hosts.len();
            for router in &routers {
                let connected: Vec<Ipv4Addr> = router
                    .lan
                    .map(|l| l.subnet)
                    .into_iter()
                    .chain(router.previous_link.map(|l| l.subnet))
                    .chain(router.next_link.map(|l| l.subnet))
                    .map(|s| s.network)
                    .collect();
                let r = routes(router);
                assert_eq!(r.len(), total - connected.len(), "R{} route count", router.index);
                for route in r {
                    assert!(
                        !connected.contains(&route.destination),
                        "R{} routes to its own network {}",
                        router.index,
                        route.destination
                    );
                }
            }
        }
    }

    #[test]
    fn test_static_routes_single_lan() {
        let routers = chain(&[20], RoutingMode::Static);
        assert_eq!(routers.len(), 2);
        assert!(routes(&routers[0]).is_empty(), "R0 is attached to everything");
        let r1 = routes(&routers[1]);
        assert_eq!(r1.len(), 1);
        assert_eq!(r1[0].destination, ip("10.0.1.0"));
        assert_eq!(r1[0].next_hop, ip("10.10.10.1"));
    }

    #[test]
    fn test_render_commands_rip() {
        let settings = Settings::default();
        let routers = chain(&[50], RoutingMode::Rip);
        let text = render_commands(&routers, &settings);
        let expected = "\
! =============================
! Commands for Router R0
! =============================
interface gig0/0
 ip address 10.0.1.1 255.255.255.192
 no shutdown
! Connect to Switch S1 and PC1 (example)
! PC1 IP: 10.0.1.2 / Mask: 255.255.255.192 / Gateway: 10.0.1.1
interface serial0/0/0
 ip address 10.10.10.1 255.255.255.252
 clock rate 64000
 no shutdown
router rip
 version 2
 network 10.0.1.0
 network 10.10.10.0
 no auto-summary
! =============================

! =============================
! Commands for Router R1
! =============================
interface serial0/0/0
 ip address 10.10.10.2 255.255.255.252
 no shutdown
router rip
 version 2
 network 10.10.10.0
 no auto-summary
! =============================

! Remember to assign the IPs to the PCs and switches accordingly";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_commands_static_lines() {
        let settings = Settings {
            clock_rate: 128000,
            ..Settings::default()
        };
        let routers = chain(&[50, 10], RoutingMode::Static);
        let text = render_commands(&routers, &settings);
        assert_eq!(text.matches(BANNER_TITLE).count(), 3);
        assert_eq!(text.matches(" clock rate 128000").count(), 2);
        assert!(text.contains("ip route 10.0.1.64 255.255.255.240 10.10.10.2"));
        assert!(text.contains("ip route 10.0.1.0 255.255.255.192 10.10.10.5"));
        assert!(!text.contains("router rip"));
        assert!(text.ends_with(CLOSING_REMINDER));
    }
}
