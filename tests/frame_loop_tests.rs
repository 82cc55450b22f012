use bunny_rig::animation::{JointMotion, MotionTable, PoseEvaluator, controller};
use bunny_rig::frame_loop::FrameLoop;
use bunny_rig::model::JointId;
use bunny_rig::renderer::camera::OrbitView;
use bunny_rig::renderer::uniform_bytes;
use bunny_rig::Frame;

fn run(frame_loop: &mut FrameLoop, seconds: &[f32]) -> Vec<Frame> {
    let mut frames = Vec::new();
    for &t in seconds {
        frame_loop.tick(t, &mut frames);
    }
    frames
}

#[test]
fn test_loop_keeps_requesting_frames_until_cancelled() {
    let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny());
    frame_loop.start();

    let frames = run(&mut frame_loop, &[0.0, 0.016, 0.033]);
    assert_eq!(frames.len(), 3);
    assert_eq!(frame_loop.frames_rendered(), 3);

    frame_loop.cancel();
    let frames = run(&mut frame_loop, &[0.05, 0.066]);
    assert!(frames.is_empty());
}

#[test]
fn test_released_explosion_decays_to_rest() {
    let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny());
    frame_loop.start();
    frame_loop.trigger_explosion(0.0);

    let times: Vec<f32> = (0..30).map(|i| i as f32 / 60.0).collect();
    let rising = run(&mut frame_loop, &times);
    let peak = rising.last().unwrap().magnitude;
    assert!(peak > 0.0);

    frame_loop.release_explosion();
    let times: Vec<f32> = (30..200).map(|i| i as f32 / 60.0).collect();
    let falling = run(&mut frame_loop, &times);

    assert!(falling[0].magnitude < peak);
    assert!(falling.windows(2).all(|w| w[1].magnitude <= w[0].magnitude));
    assert_eq!(falling.last().unwrap().magnitude, 0.0);
    assert!(falling.iter().all(|f| !f.exploding));
}

#[test]
fn test_custom_gait_from_json_drives_only_named_joints() {
    let table = MotionTable::still().with(JointId::Tail, JointMotion::sine(30.0, 1.0, 0.0));
    let json = table.to_json().unwrap();
    let loaded = MotionTable::from_json(&json).unwrap();
    assert_eq!(loaded, table);

    let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny());
    frame_loop.set_motions(loaded);
    frame_loop.set_animation(true);
    frame_loop.start();

    // phase = t * 4 = π/2
    let frames = run(&mut frame_loop, &[std::f32::consts::FRAC_PI_8]);
    let pose = frames[0].pose;
    assert!((pose[JointId::Tail] - 30.0).abs() < 1e-4);
    for joint in JointId::ALL.into_iter().filter(|j| *j != JointId::Tail) {
        assert_eq!(pose[joint], 0.0, "{}", joint.name());
    }
}

#[test]
fn test_trot_table_survives_json() {
    let trot = controller::trot();
    let back = MotionTable::from_json(&trot.to_json().unwrap()).unwrap();
    assert_eq!(back, trot);
}

#[test]
fn test_drag_rotates_view_and_reset_restores_it() {
    let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny()).with_view(OrbitView::new(10.0, 20.0, 0.0));
    frame_loop.start();
    let before = run(&mut frame_loop, &[0.0]);

    frame_loop.drag_view(30.0, 0.0);
    let dragged = run(&mut frame_loop, &[0.016]);
    assert_ne!(dragged[0].view, before[0].view);
    assert!((frame_loop.view().angle_y - 50.0).abs() < 1e-4);

    frame_loop.reset_view();
    let restored = run(&mut frame_loop, &[0.033]);
    assert_eq!(restored[0].view, before[0].view);
    // The view never leaks into the per-bone transforms
    assert_eq!(dragged[0].commands, before[0].commands);
}

#[test]
fn test_uniform_bytes_follow_command_order() {
    let mut frame_loop = FrameLoop::new(PoseEvaluator::bunny());
    frame_loop.start();
    let frames = run(&mut frame_loop, &[0.0]);
    let commands = &frames[0].commands;

    let bytes = uniform_bytes(commands);
    assert_eq!(bytes.len(), commands.len() * 96);

    // First 64 bytes of each block are the column-major model matrix
    let first: [f32; 16] = bytemuck::pod_read_unaligned(&bytes[..64]);
    assert_eq!(&first[..], commands[0].transform.as_slice());
    let neck = commands.iter().position(|c| c.bone == "neck_wedge").unwrap();
    let shape: u32 = bytemuck::pod_read_unaligned(&bytes[neck * 96 + 80..neck * 96 + 84]);
    assert_eq!(shape, commands[neck].shape.id());
}
