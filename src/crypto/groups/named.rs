//! Named elliptic curves used in the German healthcare PKI and the web PKI.
//!
//! Each curve is built and checked once per process on first use.

use {
    super::{super::mod_ring::UintMont, EllipticCurve},
    once_cell::sync::Lazy,
    ruint::{
        aliases::{U256, U384, U512},
        uint, Uint,
    },
};

pub type U521 = Uint<521, 9>;

/// Curve parameters, all with cofactor one.
struct Curve<U> {
    modulus:   U,
    param_a:   U,
    param_b:   U,
    generator: (U, U),
    order:     U,
}

impl<U: UintMont> Curve<U> {
    fn build(&self) -> EllipticCurve<U> {
        EllipticCurve::new(
            self.modulus,
            self.param_a,
            self.param_b,
            self.generator.0,
            self.generator.1,
            self.order,
            U::from_u64(1),
        )
        .expect("Named curve parameters are valid")
    }
}

/// brainpoolP256r1, RFC 5639 section 3.4
const BRAINPOOL_P256R1_PARAMS: Curve<U256> = uint!(Curve {
    modulus:   0xa9fb57db_a1eea9bc_3e660a90_9d838d72_6e3bf623_d5262028_2013481d_1f6e5377_U256,
    param_a:   0x7d5a0975_fc2c3057_eef67530_417affe7_fb8055c1_26dc5c6c_e94a4b44_f330b5d9_U256,
    param_b:   0x26dc5c6c_e94a4b44_f330b5d9_bbd77cbf_95841629_5cf7e1ce_6bccdc18_ff8c07b6_U256,
    generator: (
        0x8bd2aeb9_cb7e57cb_2c4b482f_fc81b7af_b9de27e1_e3bd23c2_3a4453bd_9ace3262_U256,
        0x547ef835_c3dac4fd_97f8461a_14611dc9_c2774513_2ded8e54_5c1d54c7_2f046997_U256,
    ),
    order:     0xa9fb57db_a1eea9bc_3e660a90_9d838d71_8c397aa3_b561a6f7_901e0e82_974856a7_U256,
});

/// brainpoolP384r1, RFC 5639 section 3.6
const BRAINPOOL_P384R1_PARAMS: Curve<U384> = uint!(Curve {
    modulus:   0x8cb91e82_a3386d28_0f5d6f7e_50e641df_152f7109_ed5456b4_12b1da19_7fb71123_acd3a729_901d1a71_87470013_3107ec53_U384,
    param_a:   0x7bc382c6_3d8c150c_3c72080a_ce05afa0_c2bea28e_4fb22787_139165ef_ba91f90f_8aa5814a_503ad4eb_04a8c7dd_22ce2826_U384,
    param_b:   0x04a8c7dd_22ce2826_8b39b554_16f0447c_2fb77de1_07dcd2a6_2e880ea5_3eeb62d5_7cb43902_95dbc994_3ab78696_fa504c11_U384,
    generator: (
        0x1d1c64f0_68cf45ff_a2a63a81_b7c13f6b_8847a3e7_7ef14fe3_db7fcafe_0cbd10e8_e826e034_36d646aa_ef87b2e2_47d4af1e_U384,
        0x8abe1d75_20f9c2a4_5cb1eb8e_95cfd552_62b70b29_feec5864_e19c054f_f9912928_0e464621_77918111_42820341_263c5315_U384,
    ),
    order:     0x8cb91e82_a3386d28_0f5d6f7e_50e641df_152f7109_ed5456b3_1f166e6c_ac0425a7_cf3ab6af_6b7fc310_3b883202_e9046565_U384,
});

/// brainpoolP512r1, RFC 5639 section 3.7
const BRAINPOOL_P512R1_PARAMS: Curve<U512> = uint!(Curve {
    modulus:   0xaadd9db8_dbe9c48b_3fd4e6ae_33c9fc07_cb308db3_b3c9d20e_d6639cca_70330871_7d4d9b00_9bc66842_aecda12a_e6a380e6_2881ff2f_2d82c685_28aa6056_583a48f3_U512,
    param_a:   0x7830a331_8b603b89_e2327145_ac234cc5_94cbdd8d_3df91610_a83441ca_ea9863bc_2ded5d5a_a8253aa1_0a2ef1c9_8b9ac8b5_7f1117a7_2bf2c7b9_e7c1ac4d_77fc94ca_U512,
    param_b:   0x3df91610_a83441ca_ea9863bc_2ded5d5a_a8253aa1_0a2ef1c9_8b9ac8b5_7f1117a7_2bf2c7b9_e7c1ac4d_77fc94ca_dc083e67_984050b7_5ebae5dd_2809bd63_8016f723_U512,
    generator: (
        0x81aee4bd_d82ed964_5a21322e_9c4c6a93_85ed9f70_b5d916c1_b43b62ee_f4d0098e_ff3b1f78_e2d0d48d_50d1687b_93b97d5f_7c6d5047_406a5e68_8b352209_bcb9f822_U512,
        0x7dde385d_566332ec_c0eabfa9_cf7822fd_f209f700_24a57b1a_a000c55b_881f8111_b2dcde49_4a5f485e_5bca4bd8_8a2763ae_d1ca2b2f_a8f05406_78cd1e0f_3ad80892_U512,
    ),
    order:     0xaadd9db8_dbe9c48b_3fd4e6ae_33c9fc07_cb308db3_b3c9d20e_d6639cca_70330870_553e5c41_4ca92619_41866119_7fac1047_1db1d381_085ddadd_b5879682_9ca90069_U512,
});

/// NIST P-256, secp256r1, SEC 2 section 2.4.2
const SECP256R1_PARAMS: Curve<U256> = uint!(Curve {
    modulus:   0xffffffff_00000001_00000000_00000000_00000000_ffffffff_ffffffff_ffffffff_U256,
    param_a:   0xffffffff_00000001_00000000_00000000_00000000_ffffffff_ffffffff_fffffffc_U256,
    param_b:   0x5ac635d8_aa3a93e7_b3ebbd55_769886bc_651d06b0_cc53b0f6_3bce3c3e_27d2604b_U256,
    generator: (
        0x6b17d1f2_e12c4247_f8bce6e5_63a440f2_77037d81_2deb33a0_f4a13945_d898c296_U256,
        0x4fe342e2_fe1a7f9b_8ee7eb4a_7c0f9e16_2bce3357_6b315ece_cbb64068_37bf51f5_U256,
    ),
    order:     0xffffffff_00000000_ffffffff_ffffffff_bce6faad_a7179e84_f3b9cac2_fc632551_U256,
});

/// NIST P-384, secp384r1, SEC 2 section 2.5.1
const SECP384R1_PARAMS: Curve<U384> = uint!(Curve {
    modulus:   0xffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_fffffffe_ffffffff_00000000_00000000_ffffffff_U384,
    param_a:   0xffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_fffffffe_ffffffff_00000000_00000000_fffffffc_U384,
    param_b:   0xb3312fa7_e23ee7e4_988e056b_e3f82d19_181d9c6e_fe814112_0314088f_5013875a_c656398d_8a2ed19d_2a85c8ed_d3ec2aef_U384,
    generator: (
        0xaa87ca22_be8b0537_8eb1c71e_f320ad74_6e1d3b62_8ba79b98_59f741e0_82542a38_5502f25d_bf55296c_3a545e38_72760ab7_U384,
        0x3617de4a_96262c6f_5d9e98bf_9292dc29_f8f41dbd_289a147c_e9da3113_b5f0b8c0_0a60b1ce_1d7e819d_7a431d7c_90ea0e5f_U384,
    ),
    order:     0xffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_c7634d81_f4372ddf_581a0db2_48b0a77a_ecec196a_ccc52973_U384,
});

/// NIST P-521, secp521r1, SEC 2 section 2.6.1
const SECP521R1_PARAMS: Curve<U521> = uint!(Curve {
    modulus:   0x1ff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_U521,
    param_a:   0x1ff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_fffffffc_U521,
    param_b:   0x51_953eb961_8e1c9a1f_929a21a0_b68540ee_a2da725b_99b315f3_b8b48991_8ef109e1_56193951_ec7e937b_1652c0bd_3bb1bf07_3573df88_3d2c34f1_ef451fd4_6b503f00_U521,
    generator: (
        0xc6_858e06b7_0404e9cd_9e3ecb66_2395b442_9c648139_053fb521_f828af60_6b4d3dba_a14b5e77_efe75928_fe1dc127_a2ffa8de_3348b3c1_856a429b_f97e7e31_c2e5bd66_U521,
        0x118_39296a78_9a3bc004_5c8a5fb4_2c7d1bd9_98f54449_579b4468_17afbd17_273e662c_97ee7299_5ef42640_c550b901_3fad0761_353c7086_a272c240_88be9476_9fd16650_U521,
    ),
    order:     0x1ff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_ffffffff_fffffffa_51868783_bf2f966b_7fcc0148_f709a5d0_3bb5c9b8_899c47ae_bb6fb71e_91386409_U521,
});

pub static BRAINPOOL_P256R1: Lazy<EllipticCurve<U256>> = Lazy::new(|| BRAINPOOL_P256R1_PARAMS.build());
pub static BRAINPOOL_P384R1: Lazy<EllipticCurve<U384>> = Lazy::new(|| BRAINPOOL_P384R1_PARAMS.build());
pub static BRAINPOOL_P512R1: Lazy<EllipticCurve<U512>> = Lazy::new(|| BRAINPOOL_P512R1_PARAMS.build());
pub static SECP256R1: Lazy<EllipticCurve<U256>> = Lazy::new(|| SECP256R1_PARAMS.build());
pub static SECP384R1: Lazy<EllipticCurve<U384>> = Lazy::new(|| SECP384R1_PARAMS.build());
pub static SECP521R1: Lazy<EllipticCurve<U521>> = Lazy::new(|| SECP521R1_PARAMS.build());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_sizes() {
        assert_eq!(BRAINPOOL_P256R1.base_field().modulus().bit_len(), 256);
        assert_eq!(SECP521R1.base_field().modulus().bit_len(), 521);
        assert_eq!(SECP384R1.scalar_field().modulus().bit_len(), 384);
    }
}
