#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use lansweep::events::{DiscoveryEvent, MemorySink};
    use lansweep::scanner::{probe_port, LivenessProbe, ProbeOutcome, Sweeper};
    use lansweep::target::{PortTable, Subnet};
    use std::net::Ipv4Addr;
    use std::sync::Arc;
    use std::time::Duration;

    /// Liveness double that answers from a fixed list of alive addresses
    struct StaticPinger {
        alive: Vec<Ipv4Addr>,
    }

    #[async_trait]
    impl LivenessProbe for StaticPinger {
        async fn check(&self, addr: Ipv4Addr, _timeout: Duration) -> bool {
            self.alive.contains(&addr)
        }
    }

    fn sweeper_with(
        table: PortTable,
        alive: Vec<Ipv4Addr>,
        sink: Arc<MemorySink>,
    ) -> Sweeper {
        Sweeper::new(
            table,
            Duration::from_millis(250),
            64,
            Arc::new(StaticPinger { alive }),
            sink,
        )
        .unwrap()
    }

    async fn bound_listener() -> (tokio::net::TcpListener, u16) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    async fn free_port() -> u16 {
        let (listener, port) = bound_listener().await;
        drop(listener);
        port
    }

    #[tokio::test]
    async fn test_probe_port_outcomes() {
        let (listener, open_port) = bound_listener().await;
        let closed_port = free_port().await;

        let outcome = probe_port(Ipv4Addr::LOCALHOST, open_port, Duration::from_millis(500)).await;
        assert_eq!(outcome, ProbeOutcome::Reachable);

        let outcome =
            probe_port(Ipv4Addr::LOCALHOST, closed_port, Duration::from_millis(500)).await;
        assert!(!outcome.is_reachable());

        drop(listener);
    }

    #[tokio::test]
    async fn test_port_sweep_reports_only_listening_ports() {
        let (listener, open_port) = bound_listener().await;
        let closed_port = free_port().await;

        let table = PortTable::from_entries([
            (open_port, "Test Service"),
            (closed_port, "Closed Service"),
        ])
        .unwrap();

        let sink = Arc::new(MemorySink::new());
        let sweeper = sweeper_with(table, vec![], sink.clone());

        let open = sweeper.sweep_ports(Ipv4Addr::LOCALHOST).await;
        assert_eq!(open, vec![(open_port, "Test Service".to_string())]);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            DiscoveryEvent::port_open(Ipv4Addr::LOCALHOST, open_port, "Test Service")
        );

        drop(listener);
    }

    #[tokio::test]
    async fn test_port_sweep_empty_when_nothing_listens() {
        // Hold both listeners before dropping so the two ports differ.
        let (listener_a, closed_a) = bound_listener().await;
        let (listener_b, closed_b) = bound_listener().await;
        drop(listener_a);
        drop(listener_b);
        let table =
            PortTable::from_entries([(closed_a, "A"), (closed_b, "B")]).unwrap();

        let sink = Arc::new(MemorySink::new());
        let sweeper = sweeper_with(table, vec![], sink.clone());

        let open = sweeper.sweep_ports(Ipv4Addr::LOCALHOST).await;
        assert!(open.is_empty());
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn test_port_sweep_idempotent() {
        let (listener, open_port) = bound_listener().await;
        let table = PortTable::from_entries([(open_port, "Test Service")]).unwrap();

        let sink = Arc::new(MemorySink::new());
        let sweeper = sweeper_with(table, vec![], sink);

        let first = sweeper.sweep_ports(Ipv4Addr::LOCALHOST).await;
        let second = sweeper.sweep_ports(Ipv4Addr::LOCALHOST).await;
        assert_eq!(first, second);

        drop(listener);
    }

    #[tokio::test]
    async fn test_single_live_host_with_one_open_port() {
        // The .1 host of the loopback /24 is alive and listens on one table
        // port; every other address reads as dead.
        let (listener, open_port) = bound_listener().await;
        let table = PortTable::from_entries([(open_port, "SSH")]).unwrap();

        let subnet = Subnet::parse("127.0.0").unwrap();
        let live = Ipv4Addr::LOCALHOST;
        let sink = Arc::new(MemorySink::new());
        let sweeper = sweeper_with(table, vec![live], sink.clone());

        sweeper.sweep(&subnet).await;

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events.contains(&DiscoveryEvent::host_alive(live)));
        assert!(events.contains(&DiscoveryEvent::port_open(live, open_port, "SSH")));

        drop(listener);
    }

    #[tokio::test]
    async fn test_live_host_with_no_listeners_yields_only_alive_event() {
        let closed_port = free_port().await;
        let table = PortTable::from_entries([(closed_port, "HTTP")]).unwrap();

        let subnet = Subnet::parse("127.0.0").unwrap();
        let live = Ipv4Addr::new(127, 0, 0, 9);
        let sink = Arc::new(MemorySink::new());
        let sweeper = sweeper_with(table, vec![live], sink.clone());

        sweeper.sweep(&subnet).await;

        assert_eq!(sink.events(), vec![DiscoveryEvent::host_alive(live)]);
    }

    #[tokio::test]
    async fn test_port_sweep_emits_one_event_per_open_port() {
        let (listener, open_port) = bound_listener().await;
        let table = PortTable::from_entries([(open_port, "Test Service")]).unwrap();
        let sink = Arc::new(MemorySink::new());
        let sweeper = sweeper_with(table, vec![], sink.clone());

        let open = sweeper.sweep_ports(Ipv4Addr::LOCALHOST).await;
        assert_eq!(open.len(), sink.events().len());

        drop(listener);
    }
}
