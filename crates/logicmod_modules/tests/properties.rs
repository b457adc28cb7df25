//! Behavioral properties checked through the host-facing API.

use logicmod_modules::{LogicModule, ModuleKind, Params, Signal};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build(kind: ModuleKind, params: Params) -> Box<dyn LogicModule> {
    init_logging();
    kind.build("dut", &params).unwrap()
}

fn set(m: &mut dyn LogicModule, pin: &str, value: u32) {
    m.set_value(pin, value).unwrap();
}

fn get(m: &dyn LogicModule, pin: &str) -> u32 {
    m.value(pin).unwrap()
}

fn tick(m: &mut dyn LogicModule) {
    set(m, "Clock", 0);
    m.recompute();
    set(m, "Clock", 1);
    m.recompute();
}

#[test]
fn adder_subtract_round_trip() {
    for width in [1u32, 4, 8, 32] {
        let params = Params::new().with("bit_width", width);
        let mut add = build(ModuleKind::Adder, params.clone());
        let mut sub = build(ModuleKind::Subtract, params);
        let max = if width == 32 { u32::MAX } else { (1 << width) - 1 };
        let samples = [0, 1, max / 3, max / 2, max - 1, max];
        for &a in &samples {
            for &b in &samples {
                for cin in [0, 1] {
                    set(add.as_mut(), "A", a);
                    set(add.as_mut(), "B", b);
                    set(add.as_mut(), "Cin", cin);
                    add.recompute();
                    let s = get(add.as_ref(), "S");
                    let cout = get(add.as_ref(), "Cout");

                    set(sub.as_mut(), "A", s);
                    set(sub.as_mut(), "B", b);
                    set(sub.as_mut(), "_Bin", 1 - cin);
                    sub.recompute();
                    assert_eq!(get(sub.as_ref(), "S"), a, "w={width} a={a} b={b} cin={cin}");
                    assert_eq!(get(sub.as_ref(), "_Bout"), 1 - cout);
                }
            }
        }
    }
}

#[test]
fn counter_wraps_after_full_period_with_single_overflow() {
    for width in [1u32, 3, 5] {
        let mut m = build(ModuleKind::Counter, Params::new().with("bit_width", width));
        set(m.as_mut(), "Enable", 1);
        set(m.as_mut(), "Reset", 0);
        let period = 1u32 << width;
        let mut overflow_at = Vec::new();
        for edge in 1..=period {
            tick(m.as_mut());
            if get(m.as_ref(), "Overflow") == 1 {
                overflow_at.push((edge, get(m.as_ref(), "out")));
            }
        }
        assert_eq!(get(m.as_ref(), "out"), 0);
        assert_eq!(overflow_at, vec![(period - 1, period - 1)]);
    }
}

#[test]
fn block_ram_one_edge_read_latency() {
    let params = Params::new()
        .with("bit_width", 8u32)
        .with("address_bit_width", 3u32);
    let mut m = build(ModuleKind::BlockRam, params);
    set(m.as_mut(), "readEnable", 1);
    set(m.as_mut(), "writeEnable", 1);
    set(m.as_mut(), "address", 5);
    set(m.as_mut(), "dataIn", 0x77);
    tick(m.as_mut());
    assert_eq!(get(m.as_ref(), "dataOut"), 0);

    set(m.as_mut(), "writeEnable", 0);
    tick(m.as_mut());
    assert_eq!(get(m.as_ref(), "dataOut"), 0x77);
}

#[test]
fn async_clear_wins_without_clock() {
    let mut m = build(ModuleKind::DFlipFlopAsync, Params::new().with("bit_width", 4u32));
    set(m.as_mut(), "Set", 0);
    set(m.as_mut(), "Clear", 0);
    set(m.as_mut(), "D", 0xB);
    tick(m.as_mut());
    assert_eq!(get(m.as_ref(), "Q"), 0xB);

    for clock in [1, 0] {
        set(m.as_mut(), "Clock", clock);
        set(m.as_mut(), "Clear", 1);
        m.recompute();
        assert_eq!(get(m.as_ref(), "Q"), 0);
        assert_eq!(get(m.as_ref(), "_Q"), 0xF);
        set(m.as_mut(), "Clear", 0);
    }
}

#[test]
fn mux_inverts_demux() {
    let params = Params::new()
        .with("select_bit_width", 2u32)
        .with("bit_width", 8u32);
    let mut demux = build(ModuleKind::Demultiplexer, params.clone());
    let mut mux = build(ModuleKind::Multiplexer, params);
    for sel in 0..4 {
        let x = 0x30 + sel;
        set(demux.as_mut(), "select", sel);
        set(demux.as_mut(), "in", x);
        demux.recompute();
        for k in 0..4 {
            let out = demux.signal(&format!("out_{k}")).unwrap();
            if k == sel {
                assert_eq!(out.value(), x);
            } else {
                assert_eq!(out, Signal::low(8));
            }
            mux.set_input(&format!("in_{k}"), out).unwrap();
        }
        set(mux.as_mut(), "select", sel);
        mux.recompute();
        assert_eq!(get(mux.as_ref(), "out"), x);
    }
}

#[test]
fn priority_encoder() {
    let mut m = build(ModuleKind::Encoder, Params::new().with("output_pin_count", 3u32));
    let code = |m: &dyn LogicModule| (0..3).fold(0, |acc, i| acc | (get(m, &format!("out_{i}")) << i));
    let clear = |m: &mut dyn LogicModule| {
        for i in 0..7 {
            set(m, &format!("in_{i}"), 0);
        }
    };

    clear(m.as_mut());
    m.recompute();
    assert_eq!(code(m.as_ref()), 0);

    for k in 0..7u32 {
        clear(m.as_mut());
        set(m.as_mut(), &format!("in_{k}"), 1);
        m.recompute();
        assert_eq!(code(m.as_ref()), k + 1);
    }

    clear(m.as_mut());
    set(m.as_mut(), "in_0", 1);
    set(m.as_mut(), "in_2", 1);
    set(m.as_mut(), "in_5", 1);
    m.recompute();
    assert_eq!(code(m.as_ref()), 6);
}

#[test]
fn repeated_recompute_is_idempotent() {
    let small = Params::new()
        .with("bit_width", 4u32)
        .with("data_bit_width", 4u32)
        .with("address_bit_width", 2u32)
        .with("select_bit_width", 1u32)
        .with("input_pin_count", 2u32)
        .with("output_pin_count", 2u32);
    for kind in ModuleKind::ALL {
        let mut m = build(kind, small.clone());
        let inputs: Vec<(String, u32)> = m
            .pins()
            .inputs()
            .map(|(_, p)| (p.name.clone(), p.width))
            .collect();
        for (name, width) in &inputs {
            m.set_input(name, Signal::high(*width)).unwrap();
        }
        m.recompute();
        let before = m.pins().outputs();
        assert!(!m.recompute(), "{kind} changed outputs on a repeated recompute");
        assert_eq!(m.pins().outputs(), before, "{kind}");
    }
}

#[test]
fn unchanged_clock_never_retriggers() {
    let mut m = build(ModuleKind::Counter, Params::new().with("bit_width", 8u32));
    set(m.as_mut(), "Enable", 1);
    set(m.as_mut(), "Reset", 0);
    tick(m.as_mut());
    for _ in 0..5 {
        m.recompute();
    }
    assert_eq!(get(m.as_ref(), "out"), 1);
}
