/// WGSL shader for instanced showroom boxes.
pub const BOX_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) surface: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) world_pos: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) surface: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    // Boxes are axis aligned, so the raw normal is already in world space.
    out.world_normal = vertex.normal;
    out.world_pos = world_pos.xyz;
    out.color = instance.color;
    out.surface = instance.surface;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let roughness = clamp(in.surface.x, 0.04, 1.0);
    let metalness = in.surface.y;
    let emissive = in.surface.z;

    let n = normalize(in.world_normal);
    let key = normalize(vec3<f32>(0.55, 0.8, -0.35));
    let fill = normalize(vec3<f32>(-0.5, 0.7, 0.6));
    let v = normalize(uniforms.eye.xyz - in.world_pos);
    let h = normalize(key + v);

    // Hemisphere ambient: warm from above, cool from below.
    let sky = vec3<f32>(1.0, 1.0, 1.0);
    let ground = vec3<f32>(0.11, 0.14, 0.2);
    let ambient = mix(ground, sky, n.y * 0.5 + 0.5) * 0.45;

    let diffuse = max(dot(n, key), 0.0) * 0.75 + max(dot(n, fill), 0.0) * 0.3;
    let shininess = mix(96.0, 4.0, roughness);
    let spec_color = mix(vec3<f32>(0.04), in.color.rgb, metalness);
    let specular = spec_color * pow(max(dot(n, h), 0.0), shininess) * (1.0 - roughness * 0.7);

    let base = in.color.rgb * (1.0 - metalness * 0.5);
    let lit = base * (ambient + diffuse) + specular;
    return vec4<f32>(mix(lit, in.color.rgb, emissive), in.color.a);
}
"#;
