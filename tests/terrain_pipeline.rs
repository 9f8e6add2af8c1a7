//! End-to-end checks over the public API: generate, store, mesh, draw.

use std::io::Write;

use voxel_terrain::{
    config::{GenerationMethod, SeamPolicy},
    engine_state::voxels::{block::block_side::BlockSide, chunk::CHUNK_VOLUME},
    Block, Chunk, ChunkCoord, ChunkMesher, EngineConfig, EngineState, TerrainGenerator,
    TextureAtlas, VoxelError, World,
};

#[test]
fn generated_terrain_meshes_with_the_standard_atlas() {
    let chunk = TerrainGenerator::default().generate_chunk(0, 0, 0);
    assert_eq!(chunk.blocks().len(), CHUNK_VOLUME);

    let mesh = ChunkMesher::default()
        .build_mesh(&chunk, &TextureAtlas::standard())
        .unwrap();
    assert!(mesh.face_count() > 0);
    assert_eq!(mesh.vertex_count(), 6 * mesh.face_count());
    assert!(mesh
        .vertices()
        .iter()
        .all(|v| v.position.iter().all(|c| (0..=16).contains(c))));
}

#[test]
fn world_round_trip_preserves_identity() {
    let mut world = World::new();
    let coord = ChunkCoord::new(-3, 7, 1);
    let stored = world.insert_chunk(coord, Chunk::checkerboard());
    assert!(world.chunk_at(coord).unwrap().ptr_eq(&stored));
    world.remove_chunk(coord);
    assert!(world.chunk_at(coord).is_none());
}

#[test]
fn seams_are_over_generated_by_default() {
    let config = EngineConfig::from_json_str(r#"{ "terrain": { "method": "solid" } }"#).unwrap();
    let mut engine = EngineState::new(config).unwrap();
    let center = ChunkCoord::new(0, 0, 0);
    engine.load_chunks_around(center);

    let draw_list = engine.build_draw_list(center).unwrap();
    assert_eq!(draw_list.len(), 27);
    assert!(draw_list.iter().all(|item| item.mesh.face_count() == 1536));
}

#[test]
fn neighbor_aware_seams_hide_the_shared_walls() {
    let config = EngineConfig::from_json_str(
        r#"{ "terrain": { "method": "solid" },
             "meshing": { "seam_policy": "neighbor_aware" } }"#,
    )
    .unwrap();
    assert_eq!(config.meshing.seam_policy, SeamPolicy::NeighborAware);
    let mut engine = EngineState::new(config).unwrap();
    let center = ChunkCoord::new(0, 0, 0);
    engine.load_chunks_around(center);

    let draw_list = engine.build_draw_list(center).unwrap();
    let centre_mesh = &draw_list
        .iter()
        .find(|item| item.coord == center)
        .unwrap()
        .mesh;
    assert!(centre_mesh.is_empty());

    let corner = draw_list
        .iter()
        .find(|item| item.coord == ChunkCoord::new(1, 1, 1))
        .unwrap();
    assert_eq!(corner.mesh.face_count(), 3 * 256);
    assert!(corner
        .mesh
        .faces()
        .iter()
        .all(|f| matches!(f.side, BlockSide::PosX | BlockSide::PosY | BlockSide::PosZ)));
}

#[test]
fn edits_are_picked_up_by_the_next_draw_list() {
    let mut config = EngineConfig::default();
    config.terrain.method = GenerationMethod::Empty;
    config.world.load_radius = 0;
    let mut engine = EngineState::new(config).unwrap();
    let center = ChunkCoord::new(0, 0, 0);
    engine.load_chunks_around(center);
    assert!(engine.build_draw_list(center).unwrap()[0].mesh.is_empty());

    engine
        .world()
        .chunk_at(center)
        .unwrap()
        .get_mut()
        .set_block_at(3, 3, 3, Block::from_id(2))
        .unwrap();
    let draw_list = engine.build_draw_list(center).unwrap();
    assert_eq!(draw_list[0].mesh.face_count(), 6);
}

#[test]
fn config_and_atlas_files_are_loaded_from_disk() {
    let dir = std::env::temp_dir().join(format!("voxel-terrain-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let atlas_path = dir.join("atlas.json");
    let atlas_json = serde_json::to_string(&TextureAtlas::standard()).unwrap();
    std::fs::write(&atlas_path, atlas_json).unwrap();

    let config_path = dir.join("config.json");
    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"{{ "terrain": {{ "seed": 42, "grass_surface": true }},
             "meshing": {{ "texture_atlas": {:?} }},
             "world": {{ "load_radius": 0 }} }}"#,
        atlas_path
    )
    .unwrap();
    drop(file);

    let config = EngineConfig::load(&config_path).unwrap();
    assert_eq!(config.terrain.seed, Some(42));
    let mut engine = EngineState::new(config).unwrap();
    assert_eq!(engine.atlas(), &TextureAtlas::standard());

    let center = ChunkCoord::new(0, 0, 0);
    engine.load_chunks_around(center);
    let draw_list = engine.build_draw_list(center).unwrap();
    assert_eq!(draw_list.len(), 1);
    assert!(!draw_list[0].mesh.is_empty());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn a_truncated_atlas_is_a_lookup_error() {
    let chunk = Chunk::filled(Block::from_id(2));
    let atlas = TextureAtlas::new(vec![]);
    let result = ChunkMesher::default().build_mesh(&chunk, &atlas);
    assert!(matches!(
        result,
        Err(VoxelError::MissingTextureMap {
            block_id: 2,
            populated: 0
        })
    ));
}
