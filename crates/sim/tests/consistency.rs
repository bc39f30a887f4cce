use glam::Vec2;
use gridfile_common::Rect;
use gridfile_sim::{SimConfig, World};
use proptest::prelude::*;

fn config(seed: u64, agents: usize, capacity: usize) -> SimConfig {
    let mut config = SimConfig {
        seed,
        initial_agents: agents,
        ..SimConfig::default()
    };
    config.grid.bucket_capacity = capacity;
    config
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn index_tracks_population_through_steps(
        seed in any::<u64>(),
        agents in 0usize..120,
        capacity in 1usize..12,
        ticks in 1u64..40,
        ox in 0.0f32..800.0,
        oy in 0.0f32..600.0,
    ) {
        let mut world = World::new(config(seed, agents, capacity)).unwrap();
        world.outbreak(Vec2::new(ox, oy));
        for _ in 0..ticks {
            world.step();
        }

        prop_assert_eq!(world.grid().len(), world.agent_count());
        let domain = world.config().domain();
        for (id, agent) in world.agents() {
            prop_assert!(domain.contains_point(agent.position));
            prop_assert_eq!(world.grid().position(*id), Some(agent.position));
        }
        let census = world.census();
        prop_assert_eq!(census.total(), world.agent_count());
        prop_assert!(census.infected >= world.config().outbreak_size);
    }

    #[test]
    fn world_query_matches_a_scan(
        seed in any::<u64>(),
        x in 0.0f32..800.0,
        y in 0.0f32..600.0,
        w in 1.0f32..300.0,
        h in 1.0f32..300.0,
    ) {
        let mut world = World::new(config(seed, 80, 6)).unwrap();
        for _ in 0..10 {
            world.step();
        }
        let rect = Rect::from_xywh(x, y, w, h);
        let mut got = world.query(&rect);
        let mut expected: Vec<_> = world
            .agents()
            .iter()
            .filter(|(_, a)| rect.contains_point(a.position))
            .map(|(id, _)| *id)
            .collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }
}
